use crate::validation::Field;

pub const FEATURE_COUNT: usize = 16;

/// Model inputs in the exact order the classifier was trained with.
pub const FEATURES: [Field; FEATURE_COUNT] = [
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
    Field::StressScore,
    Field::DietScore,
    Field::ReproHealthScore,
    Field::IntercourseInFertileWindow,
];

/// Training-time feature names, as stored in the model's `feature_names`.
pub fn feature_names() -> impl Iterator<Item = &'static str> {
    FEATURES.iter().map(|f| f.key())
}

/// A row ready for the model, in `FEATURES` order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        FEATURES.iter().position(|f| *f == field).map(|i| self.0[i])
    }
}
