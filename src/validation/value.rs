use std::collections::BTreeMap;

use super::rules::Field;

/// A form value after type conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Real(f64),
    Integer(i64),
    Binary(bool),
}

impl FieldValue {
    /// Numeric view used for bound checks and model features.
    pub fn as_f64(self) -> f64 {
        match self {
            FieldValue::Real(v)    => v,
            FieldValue::Integer(v) => v as f64,
            FieldValue::Binary(b)  => if b { 1.0 } else { 0.0 },
        }
    }

    /// Integer view; `None` for reals.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            FieldValue::Real(_)    => None,
            FieldValue::Integer(v) => Some(v),
            FieldValue::Binary(b)  => Some(b as i64),
        }
    }
}

/// Type-converted, bounds-checked form data.
///
/// Only `validate` builds one, and only when every declared field passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    values: BTreeMap<Field, FieldValue>,
}

impl ValidatedInput {
    pub(crate) fn from_values(values: BTreeMap<Field, FieldValue>) -> Self {
        ValidatedInput { values }
    }

    pub fn get(&self, field: Field) -> Option<FieldValue> {
        self.values.get(&field).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldValue)> + '_ {
        self.values.iter().map(|(f, v)| (*f, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
