use std::fmt;

use super::rules::Field;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Absent or blank after trimming.
    Required,
    /// Could not be converted to the field's numeric type.
    NotANumber,
    /// Numeric, but not 0 or 1 on a binary field.
    NotBinary,
    BelowMin,
    AboveMax,
}

/// One human-readable problem with one field.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field:   Field,
    pub kind:    ValidationErrorKind,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: Field, kind: ValidationErrorKind) -> Self {
        let rule = field.rule();
        let name = rule.name;
        let message = match kind {
            ValidationErrorKind::Required   => format!("{} harus diisi", name),
            ValidationErrorKind::NotANumber => format!("{} harus berupa angka yang valid", name),
            ValidationErrorKind::NotBinary  => format!("{} harus 0 atau 1", name),
            ValidationErrorKind::BelowMin   => format!("{} minimal {}", name, rule.min.unwrap_or_default()),
            ValidationErrorKind::AboveMax   => format!("{} maksimal {}", name, rule.max.unwrap_or_default()),
        };
        ValidationError { field, kind, message }
    }
}

/// All problems found in one submission, in rule-table order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<ValidationError>) -> Self {
        debug_assert!(!errors.is_empty());
        ValidationErrors(errors)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &ValidationError> {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.message.as_str())
    }

    pub fn contains_message(&self, message: &str) -> bool {
        self.messages().any(|m| m == message)
    }

    pub fn join(&self, sep: &str) -> String {
        self.messages().collect::<Vec<_>>().join(sep)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}
