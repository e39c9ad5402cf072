use std::fmt;

use crate::error::PredictError;
use crate::features::FeatureVector;

/// The classifier's output classes, indexed as in training.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleClass {
    Medium,
    Long,
    Short,
    Abnormal,
    /// An index outside the trained label set.
    Unknown,
}

impl CycleClass {
    pub const COUNT: usize = 4;

    pub fn from_index(index: usize) -> CycleClass {
        match index {
            0 => CycleClass::Medium,
            1 => CycleClass::Long,
            2 => CycleClass::Short,
            3 => CycleClass::Abnormal,
            _ => CycleClass::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CycleClass::Medium   => "Siklus Sedang",
            CycleClass::Long     => "Siklus Panjang",
            CycleClass::Short    => "Siklus Pendek",
            CycleClass::Abnormal => "Tidak Normal",
            CycleClass::Unknown  => "Tidak Diketahui",
        }
    }
}

impl fmt::Display for CycleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of scoring one form submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub class_index: usize,
    pub class:       CycleClass,
    /// Probability of the predicted class, as a percentage in [0, 100].
    pub confidence:  f64,
}

impl Prediction {
    pub fn new(class_index: usize, confidence: f64) -> Prediction {
        Prediction {
            class_index,
            class: CycleClass::from_index(class_index),
            confidence,
        }
    }

    /// Picks the most probable class from per-class probabilities.
    ///
    /// Ties go to the lowest index.
    pub fn from_probabilities(probs: &[f64]) -> Result<Prediction, PredictError> {
        if probs.is_empty() || probs.iter().any(|p| !p.is_finite()) {
            return Err(PredictError::NonFinite);
        }
        let (best, p) = probs
            .iter()
            .enumerate()
            .fold((0, probs[0]), |(bi, bp), (i, &p)| if p > bp { (i, p) } else { (bi, bp) });
        Ok(Prediction::new(best, (p * 100.0).clamp(0.0, 100.0)))
    }

    pub fn label(&self) -> &'static str {
        self.class.label()
    }
}

/// Anything that can turn a feature row into a prediction.
///
/// Implementations are shared across request threads and must not mutate
/// themselves while predicting.
pub trait Predictor: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictError>;
}
