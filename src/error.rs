use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or checking the XGBoost model artifact.
///
/// Every variant is fatal at startup: the server refuses to bind when the
/// model cannot be loaded.
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("I/O error reading model: {0}")]
    Io(#[from] std::io::Error),

    #[error("model is not valid XGBoost JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported objective '{0}' (expected multi:softprob or multi:softmax)")]
    UnsupportedObjective(String),

    #[error("unsupported booster '{0}' (expected gbtree or dart)")]
    UnsupportedBooster(String),

    #[error("invalid learner parameter {name}: '{value}'")]
    InvalidParam { name: &'static str, value: String },

    #[error("model declares {found} classes, expected {expected}")]
    ClassCount { expected: usize, found: usize },

    #[error("model declares {found} features, expected {expected}")]
    FeatureCount { expected: usize, found: usize },

    #[error("model feature names do not match the input schema (first difference at position {position}: expected '{expected}', found '{found}')")]
    FeatureNames {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("tree_info has {info} entries but the model has {trees} trees")]
    TreeInfo { trees: usize, info: usize },

    #[error("dart weight_drop has {weights} entries but the model has {trees} trees")]
    DartWeights { trees: usize, weights: usize },

    #[error("tree {tree}: {reason}")]
    MalformedTree { tree: usize, reason: String },
}

/// Failures while scoring a single feature vector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictError {
    #[error("expected {expected} features, got {found}")]
    FeatureCount { expected: usize, found: usize },

    #[error("model produced non-finite class probabilities")]
    NonFinite,

    #[error("prediction backend failure: {0}")]
    Backend(String),
}

/// Invalid runtime configuration values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{var}: invalid socket address '{value}'")]
    BindAddr { var: &'static str, value: String },

    #[error("{var} must not be empty")]
    Empty { var: &'static str },
}
