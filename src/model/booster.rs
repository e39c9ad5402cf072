use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{ModelError, PredictError};
use crate::features::{feature_names, FeatureVector, FEATURE_COUNT};
use crate::model::predictor::{CycleClass, Prediction, Predictor};
use crate::model::tree::{RegTree, TreeNode};

// ---------------------------------------------------------------------------
// XGBoost `save_model` JSON documents
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ModelDoc {
    learner: LearnerDoc,
}

#[derive(Deserialize)]
struct LearnerDoc {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: Value,
    learner_model_param: LearnerParamDoc,
    objective: ObjectiveDoc,
}

/// XGBoost stores every learner parameter as a string.
#[derive(Deserialize)]
struct LearnerParamDoc {
    #[serde(default = "default_base_score")]
    base_score: String,
    num_class: String,
    num_feature: String,
}

fn default_base_score() -> String {
    "5E-1".to_owned()
}

#[derive(Deserialize)]
struct ObjectiveDoc {
    name: String,
}

#[derive(Deserialize)]
struct GbTreeDoc {
    model: GbTreeModelDoc,
}

#[derive(Deserialize)]
struct DartDoc {
    gbtree: GbTreeDoc,
    weight_drop: Vec<f32>,
}

#[derive(Deserialize)]
struct GbTreeModelDoc {
    trees: Vec<TreeDoc>,
    tree_info: Vec<i64>,
}

#[derive(Deserialize)]
struct TreeDoc {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f32>,
    default_left: Vec<Flag>,
    #[serde(default)]
    split_type: Vec<i64>,
}

/// Older exports write `default_left` as booleans, newer ones as 0/1.
#[derive(Deserialize, Clone, Copy)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i)  => i != 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Compiled model
// ---------------------------------------------------------------------------

/// A multi-class gradient-boosted tree ensemble loaded from XGBoost JSON.
///
/// Immutable after loading; one instance is shared by every request thread.
#[derive(Debug, Clone)]
pub struct GbtModel {
    trees:       Vec<RegTree>,
    tree_class:  Vec<usize>,
    /// 1.0 for gbtree, `weight_drop` for dart.
    tree_weight: Vec<f32>,
    base_margin: Vec<f32>,
    num_class:   usize,
    num_feature: usize,
}

impl GbtModel {
    /// Loads and checks a model file. Any failure is fatal for the server.
    pub fn load_json(path: impl AsRef<Path>) -> Result<GbtModel, ModelError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ModelError::NotFound(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        GbtModel::from_reader(std::io::BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<GbtModel, ModelError> {
        let doc: ModelDoc = serde_json::from_reader(reader)?;
        GbtModel::from_doc(doc)
    }

    pub fn from_json_str(json: &str) -> Result<GbtModel, ModelError> {
        let doc: ModelDoc = serde_json::from_str(json)?;
        GbtModel::from_doc(doc)
    }

    fn from_doc(doc: ModelDoc) -> Result<GbtModel, ModelError> {
        let learner = doc.learner;

        let objective = learner.objective.name;
        if objective != "multi:softprob" && objective != "multi:softmax" {
            return Err(ModelError::UnsupportedObjective(objective));
        }

        let params = &learner.learner_model_param;
        let num_class = parse_count("num_class", &params.num_class)?;
        if num_class != CycleClass::COUNT {
            return Err(ModelError::ClassCount { expected: CycleClass::COUNT, found: num_class });
        }
        let num_feature = parse_count("num_feature", &params.num_feature)?;
        if num_feature != FEATURE_COUNT {
            return Err(ModelError::FeatureCount { expected: FEATURE_COUNT, found: num_feature });
        }
        let base_margin = parse_base_score(&params.base_score, num_class)?;

        if !learner.feature_names.is_empty() {
            check_feature_names(&learner.feature_names)?;
        }

        let (model, weights) = split_booster(learner.gradient_booster)?;
        let num_trees = model.trees.len();

        if model.tree_info.len() != num_trees {
            return Err(ModelError::TreeInfo { trees: num_trees, info: model.tree_info.len() });
        }
        let tree_weight = match weights {
            Some(w) if w.len() != num_trees => {
                return Err(ModelError::DartWeights { trees: num_trees, weights: w.len() });
            }
            Some(w) => w,
            None => vec![1.0; num_trees],
        };

        let mut tree_class = Vec::with_capacity(num_trees);
        for (i, &class) in model.tree_info.iter().enumerate() {
            if class < 0 || class as usize >= num_class {
                return Err(malformed(i, format!("tree_info class {} out of range", class)));
            }
            tree_class.push(class as usize);
        }

        let trees = model
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, t)| compile_tree(i, t, num_feature))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GbtModel { trees, tree_class, tree_weight, base_margin, num_class, num_feature })
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn num_class(&self) -> usize {
        self.num_class
    }

    pub fn num_feature(&self) -> usize {
        self.num_feature
    }

    /// Depth of the deepest tree in the ensemble.
    pub fn max_depth(&self) -> usize {
        self.trees.iter().map(RegTree::depth).max().unwrap_or(0)
    }

    /// Raw per-class scores: base margin plus the weighted leaf of every tree
    /// assigned to that class.
    pub fn margins(&self, features: &[f64]) -> Vec<f32> {
        let mut margins = self.base_margin.clone();
        for ((tree, &class), &weight) in self.trees.iter().zip(&self.tree_class).zip(&self.tree_weight) {
            margins[class] += weight * tree.leaf_value(features);
        }
        margins
    }

    /// Class probabilities (softmax of the margins).
    pub fn predict_proba(&self, features: &[f64]) -> Vec<f64> {
        softmax(&self.margins(features))
    }
}

impl Predictor for GbtModel {
    fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictError> {
        let row = features.as_slice();
        if row.len() != self.num_feature {
            return Err(PredictError::FeatureCount { expected: self.num_feature, found: row.len() });
        }
        Prediction::from_probabilities(&self.predict_proba(row))
    }
}

/// Numerically stable softmax.
pub fn softmax(margins: &[f32]) -> Vec<f64> {
    let max = margins.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
    let exps: Vec<f64> = margins.iter().map(|&m| (m as f64 - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn malformed(tree: usize, reason: impl Into<String>) -> ModelError {
    ModelError::MalformedTree { tree, reason: reason.into() }
}

fn parse_count(name: &'static str, value: &str) -> Result<usize, ModelError> {
    value
        .trim()
        .parse::<usize>()
        .map_err(|_| ModelError::InvalidParam { name, value: value.to_owned() })
}

/// Accepts a scalar (`"5E-1"`) or a per-class vector (`"[0.1,0.2,0.3,0.4]"`).
fn parse_base_score(value: &str, num_class: usize) -> Result<Vec<f32>, ModelError> {
    let invalid = || ModelError::InvalidParam { name: "base_score", value: value.to_owned() };
    let inner = value.trim().trim_start_matches('[').trim_end_matches(']');
    let scores = inner
        .split(',')
        .map(|s| s.trim().parse::<f32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;
    match scores.len() {
        1 => Ok(vec![scores[0]; num_class]),
        n if n == num_class => Ok(scores),
        _ => Err(invalid()),
    }
}

fn check_feature_names(names: &[String]) -> Result<(), ModelError> {
    let expected: Vec<&str> = feature_names().collect();
    let len = expected.len().max(names.len());
    for position in 0..len {
        let want = expected.get(position).copied().unwrap_or("");
        let got  = names.get(position).map(String::as_str).unwrap_or("");
        if want != got {
            return Err(ModelError::FeatureNames {
                position,
                expected: want.to_owned(),
                found: got.to_owned(),
            });
        }
    }
    Ok(())
}

fn split_booster(booster: Value) -> Result<(GbTreeModelDoc, Option<Vec<f32>>), ModelError> {
    let name = booster
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_owned();
    match name.as_str() {
        "gbtree" => {
            let doc: GbTreeDoc = serde_json::from_value(booster)?;
            Ok((doc.model, None))
        }
        "dart" => {
            let doc: DartDoc = serde_json::from_value(booster)?;
            Ok((doc.gbtree.model, Some(doc.weight_drop)))
        }
        _ => Err(ModelError::UnsupportedBooster(name)),
    }
}

fn compile_tree(index: usize, doc: TreeDoc, num_feature: usize) -> Result<RegTree, ModelError> {
    let n = doc.left_children.len();
    let lengths = [
        doc.right_children.len(),
        doc.split_indices.len(),
        doc.split_conditions.len(),
        doc.default_left.len(),
    ];
    if lengths.iter().any(|&l| l != n) {
        return Err(malformed(index, "node arrays have different lengths"));
    }
    if doc.split_type.iter().any(|&t| t != 0) {
        return Err(malformed(index, "categorical splits are not supported"));
    }

    let mut nodes = Vec::with_capacity(n);
    for i in 0..n {
        let (left, right) = (doc.left_children[i], doc.right_children[i]);
        if left == -1 {
            nodes.push(TreeNode::Leaf { value: doc.split_conditions[i] });
            continue;
        }
        if left < 0 || right < 0 || doc.split_indices[i] < 0 {
            return Err(malformed(index, format!("node {} has a negative index", i)));
        }
        nodes.push(TreeNode::Split {
            feature:      doc.split_indices[i] as usize,
            threshold:    doc.split_conditions[i],
            left:         left as usize,
            right:        right as usize,
            default_left: doc.default_left[i].is_set(),
        });
    }

    RegTree::new(nodes, num_feature).map_err(|reason| malformed(index, reason))
}
