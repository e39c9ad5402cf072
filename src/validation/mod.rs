pub mod rules;
pub mod value;
pub mod errors;
pub mod validator;

pub use rules::{Field, FieldKind, Rule, RULES};
pub use value::{FieldValue, ValidatedInput};
pub use errors::{ValidationError, ValidationErrorKind, ValidationErrors};
pub use validator::validate;
