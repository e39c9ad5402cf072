pub mod labels;
pub mod bundle;

pub use labels::{cycle_category, health_score, stress_score, yes_no, Severity};
pub use bundle::{build_display, DisplayBundle, DisplayRow};
