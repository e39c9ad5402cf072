pub mod schema;
pub mod assembler;

pub use schema::{feature_names, FeatureVector, FEATURES, FEATURE_COUNT};
pub use assembler::assemble;
