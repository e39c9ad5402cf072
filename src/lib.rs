pub mod error;
pub mod config;
pub mod validation;
pub mod features;
pub mod model;
pub mod present;
pub mod handler;

// Convenience re-exports
pub use error::{ConfigError, ModelError, PredictError};
pub use config::AppConfig;
pub use validation::{validate, Field, FieldValue, ValidatedInput, ValidationErrors};
pub use features::{assemble, FeatureVector, FEATURES};
pub use model::{CycleClass, GbtModel, Prediction, Predictor};
pub use present::{build_display, DisplayBundle, Severity};
pub use handler::{FormHandler, FormOutcome, ResultView};
