use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const FEATURE_COUNT: usize = 5;

/// One boosted tree in structure-of-arrays layout. All arrays are parallel,
/// indexed by node id; node 0 is the root and a node is a leaf iff its left
/// child is 0 (the root can never be a child).
#[derive(Deserialize, Debug, Clone)]
pub struct Tree {
    split_indices: Vec<u32>,
    thresholds: Vec<f64>,
    children_left: Vec<u32>,
    children_right: Vec<u32>,
    leaf_values: Vec<f64>,
}

impl Tree {
    pub fn new(
        split_indices: Vec<u32>,
        thresholds: Vec<f64>,
        children_left: Vec<u32>,
        children_right: Vec<u32>,
        leaf_values: Vec<f64>,
    ) -> Self {
        Self {
            split_indices,
            thresholds,
            children_left,
            children_right,
            leaf_values,
        }
    }

    /// A single-leaf tree that always contributes `value`.
    pub fn stump(value: f64) -> Self {
        Self::new(vec![0], vec![0.0], vec![0], vec![0], vec![value])
    }

    fn n_nodes(&self) -> usize {
        self.split_indices.len()
    }

    /// Structural checks deferred to load time so a malformed artifact fails
    /// loudly once instead of panicking mid-request.
    fn validate(&self, index: usize, num_features: usize) -> Result<()> {
        let n = self.n_nodes();
        if n == 0 {
            bail!("tree {} is empty", index);
        }
        for (name, len) in [
            ("thresholds", self.thresholds.len()),
            ("children_left", self.children_left.len()),
            ("children_right", self.children_right.len()),
            ("leaf_values", self.leaf_values.len()),
        ] {
            if len != n {
                bail!(
                    "tree {}: {} has {} entries, expected {}",
                    index,
                    name,
                    len,
                    n
                );
            }
        }
        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == 0 {
                continue; // leaf
            }
            if left as usize >= n || right as usize >= n || right == 0 {
                bail!(
                    "tree {}: node {} has out-of-bounds child ({}, {})",
                    index,
                    node,
                    left,
                    right
                );
            }
            // Children must point strictly forward; this rules out cycles,
            // so traversal in `score` always terminates.
            if left as usize <= node || right as usize <= node {
                bail!(
                    "tree {}: node {} has backward child pointer ({}, {})",
                    index,
                    node,
                    left,
                    right
                );
            }
            if self.split_indices[node] as usize >= num_features {
                bail!(
                    "tree {}: node {} splits on feature {} but the model has {}",
                    index,
                    node,
                    self.split_indices[node],
                    num_features
                );
            }
        }
        Ok(())
    }

    fn score(&self, features: &[f64]) -> f64 {
        let mut node = 0usize;
        loop {
            let left = self.children_left[node];
            if left == 0 {
                return self.leaf_values[node];
            }
            node = if features[self.split_indices[node] as usize] < self.thresholds[node] {
                left as usize
            } else {
                self.children_right[node] as usize
            };
        }
    }
}

#[derive(Deserialize)]
struct ModelJson {
    #[allow(dead_code)]
    version: u32,
    model_name: String,
    num_features: usize,
    #[serde(default)]
    feature_names: Option<Vec<String>>,
    base_score: f64,
    trees: Vec<Tree>,
}

/// Loaded gradient-boosted ensemble. One instance per process, read-only,
/// shared across all concurrent workers without locking.
#[derive(Debug)]
pub struct PaceModel {
    trees: Vec<Tree>,
    base_score: f64,
    num_features: usize,
    name: String,
}

impl PaceModel {
    /// Load and structurally validate the model artifact.
    pub fn load(path: &str) -> Result<Self> {
        let text = fs::read_to_string(Path::new(path))
            .with_context(|| format!("failed to read model artifact at {}", path))?;
        let parsed: ModelJson =
            serde_json::from_str(&text).with_context(|| "failed to parse model JSON")?;
        if let Some(names) = &parsed.feature_names {
            if names.len() != parsed.num_features {
                bail!(
                    "feature_names has {} entries, num_features is {}",
                    names.len(),
                    parsed.num_features
                );
            }
        }
        Self::from_parts(
            parsed.trees,
            parsed.base_score,
            parsed.num_features,
            parsed.model_name,
        )
    }

    pub fn from_parts(
        trees: Vec<Tree>,
        base_score: f64,
        num_features: usize,
        name: String,
    ) -> Result<Self> {
        if trees.is_empty() {
            bail!("model artifact contains no trees");
        }
        for (i, tree) in trees.iter().enumerate() {
            tree.validate(i, num_features)?;
        }
        Ok(Self {
            trees,
            base_score,
            num_features,
            name,
        })
    }

    /// Model tag reported in the response `meta.model` field.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Synchronous vector-in, scalar-out inference: base score plus the sum
    /// of leaf contributions (leaf values already carry the learning rate).
    pub fn predict(&self, features: &[f64]) -> Result<f64, String> {
        if features.len() != self.num_features {
            return Err(format!(
                "feature length mismatch: got {}, expected {}",
                features.len(),
                self.num_features
            ));
        }
        let sum: f64 = self.trees.iter().map(|t| t.score(features)).sum();
        Ok(self.base_score + sum)
    }
}
