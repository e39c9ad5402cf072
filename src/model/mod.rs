pub mod tree;
pub mod booster;
pub mod predictor;

pub use tree::{RegTree, TreeNode};
pub use booster::GbtModel;
pub use predictor::{CycleClass, Prediction, Predictor};
