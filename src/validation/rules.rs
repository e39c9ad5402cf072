/// Every field the prediction form submits.
///
/// The declaration order matches `RULES`, which is also the order validation
/// messages are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    CycleLength,
    PeriodLength,
    Age,
    CycleWithPeakOrNot,
    EstimatedDayOfOvulation,
    FirstDayOfHigh,
    LengthOfLutealPhase,
    NumberOfDaysOfIntercourse,
    TotalNumberOfHighDays,
    TotalHighPostPeak,
    TotalNumberOfPeakDays,
    TotalDaysOfFertility,
    TotalFertilityFormula,
    LengthOfMenses,
    UnusualBleeding,
    DietScore,
    ReproHealthScore,
    StressScore,
    IntercourseInFertileWindow,
}

impl Field {
    pub const COUNT: usize = 19;

    pub const ALL: [Field; Field::COUNT] = [
        Field::CycleLength,
        Field::PeriodLength,
        Field::Age,
        Field::CycleWithPeakOrNot,
        Field::EstimatedDayOfOvulation,
        Field::FirstDayOfHigh,
        Field::LengthOfLutealPhase,
        Field::NumberOfDaysOfIntercourse,
        Field::TotalNumberOfHighDays,
        Field::TotalHighPostPeak,
        Field::TotalNumberOfPeakDays,
        Field::TotalDaysOfFertility,
        Field::TotalFertilityFormula,
        Field::LengthOfMenses,
        Field::UnusualBleeding,
        Field::DietScore,
        Field::ReproHealthScore,
        Field::StressScore,
        Field::IntercourseInFertileWindow,
    ];

    /// The `name=` attribute used by the HTML form, and the feature name the
    /// model was trained with for the 16 model inputs.
    pub fn key(self) -> &'static str {
        match self {
            Field::CycleLength                => "cycle_length",
            Field::PeriodLength               => "period_length",
            Field::Age                        => "age",
            Field::CycleWithPeakOrNot         => "CycleWithPeakorNot",
            Field::EstimatedDayOfOvulation    => "EstimatedDayofOvulation",
            Field::FirstDayOfHigh             => "FirstDayofHigh",
            Field::LengthOfLutealPhase        => "LengthofLutealPhase",
            Field::NumberOfDaysOfIntercourse  => "NumberofDaysofIntercourse",
            Field::TotalNumberOfHighDays      => "TotalNumberofHighDays",
            Field::TotalHighPostPeak          => "TotalHighPostPeak",
            Field::TotalNumberOfPeakDays      => "TotalNumberofPeakDays",
            Field::TotalDaysOfFertility       => "TotalDaysofFertility",
            Field::TotalFertilityFormula      => "TotalFertilityFormula",
            Field::LengthOfMenses             => "LengthofMenses",
            Field::UnusualBleeding            => "UnusualBleeding",
            Field::DietScore                  => "DietScore",
            Field::ReproHealthScore           => "ReproHealthScore",
            Field::StressScore                => "StressScore",
            Field::IntercourseInFertileWindow => "IntercourseInFertileWindow",
        }
    }

    pub fn rule(self) -> &'static Rule {
        &RULES[self as usize]
    }

    /// Human-readable (Indonesian) name shown in messages and on the result page.
    pub fn display_name(self) -> &'static str {
        self.rule().name
    }
}

/// How a raw form string is converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Decimal number, finite.
    Real,
    /// Signed decimal integer.
    Integer,
    /// The integer 0 or 1.
    Binary,
}

/// One row of the validation table. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub field: Field,
    pub kind:  FieldKind,
    pub min:   Option<f64>,
    pub max:   Option<f64>,
    pub name:  &'static str,
}

const fn ranged(field: Field, kind: FieldKind, min: f64, max: f64, name: &'static str) -> Rule {
    Rule { field, kind, min: Some(min), max: Some(max), name }
}

const fn binary(field: Field, name: &'static str) -> Rule {
    Rule { field, kind: FieldKind::Binary, min: None, max: None, name }
}

use FieldKind::{Integer, Real};

pub static RULES: [Rule; Field::COUNT] = [
    ranged(Field::CycleLength,               Real,    15.0, 50.0, "Panjang Siklus"),
    ranged(Field::PeriodLength,              Real,     2.0, 10.0, "Lama Menstruasi"),
    ranged(Field::Age,                       Real,    15.0, 50.0, "Usia"),
    binary(Field::CycleWithPeakOrNot,                             "Siklus dengan Peak"),
    ranged(Field::EstimatedDayOfOvulation,   Real,     1.0, 30.0, "Perkiraan Ovulasi"),
    ranged(Field::FirstDayOfHigh,            Real,     1.0, 30.0, "Hari Pertama Tinggi"),
    ranged(Field::LengthOfLutealPhase,       Real,     1.0, 20.0, "Panjang Fase Luteal"),
    ranged(Field::NumberOfDaysOfIntercourse, Integer,  0.0, 30.0, "Jumlah Hari Berhubungan"),
    ranged(Field::TotalNumberOfHighDays,     Integer,  0.0, 30.0, "Total Hari Tinggi"),
    ranged(Field::TotalHighPostPeak,         Integer,  0.0, 30.0, "Total High Post Peak"),
    ranged(Field::TotalNumberOfPeakDays,     Integer,  0.0, 30.0, "Total Hari Peak"),
    ranged(Field::TotalDaysOfFertility,      Integer,  0.0, 30.0, "Total Hari Subur"),
    ranged(Field::TotalFertilityFormula,     Integer,  0.0, 30.0, "Total Fertility Formula"),
    ranged(Field::LengthOfMenses,            Integer,  1.0, 10.0, "Panjang Menstruasi"),
    binary(Field::UnusualBleeding,                                "Perdarahan Tidak Biasa"),
    ranged(Field::DietScore,                 Integer,  1.0,  5.0, "Skor Diet"),
    ranged(Field::ReproHealthScore,          Integer,  1.0,  5.0, "Skor Kesehatan Reproduksi"),
    ranged(Field::StressScore,               Integer,  1.0,  5.0, "Skor Stres"),
    binary(Field::IntercourseInFertileWindow,                     "Hubungan di Masa Subur"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_are_indexed_by_field() {
        for (i, field) in Field::ALL.iter().enumerate() {
            assert_eq!(RULES[i].field, *field);
            assert_eq!(*field as usize, i);
        }
    }

    #[test]
    fn keys_are_unique() {
        for (i, a) in Field::ALL.iter().enumerate() {
            for b in &Field::ALL[i + 1..] {
                assert_ne!(a.key(), b.key());
            }
        }
    }

    #[test]
    fn binary_rules_have_no_bounds() {
        for rule in RULES.iter().filter(|r| r.kind == FieldKind::Binary) {
            assert!(rule.min.is_none() && rule.max.is_none(), "{:?}", rule.field);
        }
    }

    #[test]
    fn ranged_rules_have_ordered_bounds() {
        for rule in RULES.iter().filter(|r| r.kind != FieldKind::Binary) {
            let (min, max) = (rule.min.unwrap(), rule.max.unwrap());
            assert!(min < max, "{:?}", rule.field);
        }
    }
}
