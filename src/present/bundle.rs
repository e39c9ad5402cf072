use crate::model::Prediction;
use crate::validation::{Field, FieldValue, ValidatedInput};

use super::labels::{cycle_category, health_score, stress_score, yes_no, Severity, UNKNOWN};

/// One labelled line on the result page.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRow {
    /// Stable identifier, usable as an HTML id.
    pub key:   &'static str,
    pub label: &'static str,
    pub value: String,
}

/// Everything the result page shows besides the label and confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBundle {
    pub rows:           Vec<DisplayRow>,
    pub cycle_category: &'static str,
    pub severity:       Severity,
}

impl DisplayBundle {
    pub fn row(&self, key: &str) -> Option<&DisplayRow> {
        self.rows.iter().find(|r| r.key == key)
    }
}

/// Maps validated input and a prediction to display-ready strings.
pub fn build_display(input: &ValidatedInput, prediction: &Prediction) -> DisplayBundle {
    let category = input
        .get(Field::CycleLength)
        .map(|v| cycle_category(v.as_f64()))
        .unwrap_or(UNKNOWN);

    let text   = |f: Field| input.get(f).map(value_text).unwrap_or_else(|| "-".to_owned());
    let flag   = |f: Field| yes_no(input.get(f).map_or(false, |v| v.as_f64() == 1.0)).to_owned();
    let health = |f: Field| input.get(f).and_then(FieldValue::as_i64).map_or(UNKNOWN, health_score).to_owned();
    let stress = input
        .get(Field::StressScore)
        .and_then(FieldValue::as_i64)
        .map_or(UNKNOWN, stress_score)
        .to_owned();

    let rows = vec![
        row("cycle",          Field::CycleLength,               format!("{} hari", text(Field::CycleLength))),
        DisplayRow { key: "cycle_category", label: "Kategori Siklus", value: category.to_owned() },
        row("period",         Field::PeriodLength,              format!("{} hari", text(Field::PeriodLength))),
        row("age",            Field::Age,                       format!("{} tahun", text(Field::Age))),
        row("ovulation",      Field::EstimatedDayOfOvulation,   format!("Hari ke-{}", text(Field::EstimatedDayOfOvulation))),
        row("luteal",         Field::LengthOfLutealPhase,       format!("{} hari", text(Field::LengthOfLutealPhase))),
        row("intercourse",    Field::NumberOfDaysOfIntercourse, text(Field::NumberOfDaysOfIntercourse)),
        row("fertile_window", Field::IntercourseInFertileWindow, flag(Field::IntercourseInFertileWindow)),
        row("peak",           Field::CycleWithPeakOrNot,        flag(Field::CycleWithPeakOrNot)),
        row("bleeding",       Field::UnusualBleeding,           flag(Field::UnusualBleeding)),
        row("diet",           Field::DietScore,                 health(Field::DietScore)),
        row("repro_health",   Field::ReproHealthScore,          health(Field::ReproHealthScore)),
        row("stress",         Field::StressScore,               stress),
    ];

    DisplayBundle {
        rows,
        cycle_category: category,
        severity: Severity::for_label(prediction.label()),
    }
}

fn row(key: &'static str, field: Field, value: String) -> DisplayRow {
    DisplayRow { key, label: field.display_name(), value }
}

/// Reals always show a decimal part (`28.0`, `28.5`); integers never do.
fn value_text(value: FieldValue) -> String {
    match value {
        FieldValue::Real(v) if v.fract() == 0.0 => format!("{:.1}", v),
        FieldValue::Real(v)    => v.to_string(),
        FieldValue::Integer(v) => v.to_string(),
        FieldValue::Binary(b)  => (b as u8).to_string(),
    }
}
