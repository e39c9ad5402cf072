/// A node in a regression tree (either a split or a leaf).
///
/// Child indices point into the owning tree's node array.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    Split {
        feature:      usize,
        threshold:    f32,
        left:         usize,
        right:        usize,
        default_left: bool,
    },
    Leaf {
        value: f32,
    },
}

/// One boosted regression tree, flattened with the root at index 0.
#[derive(Debug, Clone, PartialEq)]
pub struct RegTree {
    nodes: Vec<TreeNode>,
}

impl RegTree {
    /// Builds a tree from nodes, checking child links and feature indices.
    ///
    /// Every node reachable from the root must be reached exactly once;
    /// unreachable slots (pruned nodes) are allowed and never visited.
    pub fn new(nodes: Vec<TreeNode>, num_features: usize) -> Result<RegTree, String> {
        if nodes.is_empty() {
            return Err("tree has no nodes".into());
        }
        let mut seen = vec![false; nodes.len()];
        let mut stack = vec![0usize];
        while let Some(i) = stack.pop() {
            if seen[i] {
                return Err(format!("node {} is reachable more than once", i));
            }
            seen[i] = true;
            if let TreeNode::Split { feature, left, right, threshold, .. } = nodes[i] {
                if feature >= num_features {
                    return Err(format!("node {} splits on feature {} (model has {})", i, feature, num_features));
                }
                if threshold.is_nan() {
                    return Err(format!("node {} has a NaN split threshold", i));
                }
                for child in [left, right] {
                    if child >= nodes.len() {
                        return Err(format!("node {} has invalid child index {}", i, child));
                    }
                    stack.push(child);
                }
            }
        }
        Ok(RegTree { nodes })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the depth of the tree; a single leaf has depth 0.
    pub fn depth(&self) -> usize {
        fn walk(nodes: &[TreeNode], i: usize) -> usize {
            match nodes[i] {
                TreeNode::Leaf { .. } => 0,
                TreeNode::Split { left, right, .. } => 1 + walk(nodes, left).max(walk(nodes, right)),
            }
        }
        walk(&self.nodes, 0)
    }

    /// Walks from the root to a leaf and returns its value.
    ///
    /// Features are compared in `f32`, matching how the trees were trained:
    /// a sample goes left when `x < threshold`. Missing values (NaN) follow
    /// the node's default direction.
    pub fn leaf_value(&self, features: &[f64]) -> f32 {
        let mut i = 0;
        loop {
            match self.nodes[i] {
                TreeNode::Leaf { value } => return value,
                TreeNode::Split { feature, threshold, left, right, default_left } => {
                    let x = features.get(feature).copied().unwrap_or(f64::NAN) as f32;
                    i = if x.is_nan() {
                        if default_left { left } else { right }
                    } else if x < threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }
}
