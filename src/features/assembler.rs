use crate::validation::ValidatedInput;

use super::schema::{FeatureVector, FEATURES, FEATURE_COUNT};

/// Lays out validated values in schema order.
///
/// A schema field missing from `input` becomes 0.0. That cannot happen for
/// input produced by `validate`, which requires every field.
pub fn assemble(input: &ValidatedInput) -> FeatureVector {
    let mut row = [0.0; FEATURE_COUNT];
    for (slot, field) in row.iter_mut().zip(FEATURES.iter()) {
        if let Some(value) = input.get(*field) {
            *slot = value.as_f64();
        }
    }
    FeatureVector(row)
}
