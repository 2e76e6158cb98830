//! Regression models consumed by the estimator.
//!
//! The persisted form (`ModelFile`) is validated once at load and turned into
//! an inference-only value behind the [`Model`] trait. After validation,
//! prediction cannot fail or panic: widths, feature indices and tree links
//! have all been checked.

use std::fmt;

use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::domain::{FEATURE_COUNT, FeatureVector};

use super::ArtifactError;

const ARTIFACT: &str = "model";

/// Maps a scaled feature vector to a price.
pub trait Model: Send + Sync + fmt::Debug {
    fn predict(&self, features: &FeatureVector) -> f64;

    /// Short label for bundle summaries.
    fn describe(&self) -> String;
}

/// On-disk model representation (`model.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelFile {
    Linear {
        intercept: f64,
        coefficients: Vec<f64>,
    },
    TreeEnsemble {
        base_score: f64,
        aggregation: Aggregation,
        trees: Vec<RegressionTree>,
    },
}

impl ModelFile {
    /// Validate and build the inference model.
    pub fn into_model(self) -> Result<Box<dyn Model>, ArtifactError> {
        match self {
            ModelFile::Linear {
                intercept,
                coefficients,
            } => Ok(Box::new(LinearRegressor::new(intercept, coefficients)?)),
            ModelFile::TreeEnsemble {
                base_score,
                aggregation,
                trees,
            } => Ok(Box::new(TreeEnsemble::new(base_score, aggregation, trees)?)),
        }
    }
}

/// `price = intercept + Σ coefficient_i · x_i`
#[derive(Debug, Clone)]
pub struct LinearRegressor {
    intercept: f64,
    coefficients: DVector<f64>,
}

impl LinearRegressor {
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Result<Self, ArtifactError> {
        if coefficients.len() != FEATURE_COUNT {
            return Err(ArtifactError::Width {
                artifact: ARTIFACT,
                expected: FEATURE_COUNT,
                found: coefficients.len(),
            });
        }
        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::Invalid {
                artifact: ARTIFACT,
                reason: "linear model parameters must be finite".to_string(),
            });
        }
        Ok(Self {
            intercept,
            coefficients: DVector::from_vec(coefficients),
        })
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64] {
        self.coefficients.as_slice()
    }
}

impl Model for LinearRegressor {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let x = DVector::from_row_slice(features);
        self.intercept + self.coefficients.dot(&x)
    }

    fn describe(&self) -> String {
        format!("linear ({} coefficients)", self.coefficients.len())
    }
}

/// How per-tree outputs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// Boosting: `base_score + Σ tree(x)`.
    Sum,
    /// Bagging/forest: `base_score + mean(tree(x))`.
    Mean,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TreeNode {
    /// Go to `left` when `x[feature] <= threshold`, else `right`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// Flat node array; node `0` is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Children must point strictly forward, which rules out cycles and
    /// guarantees `evaluate` terminates.
    fn validate(&self, tree: usize) -> Result<(), ArtifactError> {
        let invalid = |reason: String| ArtifactError::Invalid {
            artifact: ARTIFACT,
            reason: format!("tree {tree}: {reason}"),
        };

        if self.nodes.is_empty() {
            return Err(invalid("has no nodes".to_string()));
        }

        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(invalid(format!(
                            "node {idx} splits on feature {feature}, pipeline has {FEATURE_COUNT}"
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(invalid(format!("node {idx} has a non-finite threshold")));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(invalid(format!("node {idx} links to invalid child {child}")));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(invalid(format!("leaf {idx} has a non-finite value")));
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, x: &FeatureVector) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    idx = if x[feature] <= threshold { left } else { right };
                }
                TreeNode::Leaf { value } => return value,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct TreeEnsemble {
    base_score: f64,
    aggregation: Aggregation,
    trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    pub fn new(base_score: f64, aggregation: Aggregation, trees: Vec<RegressionTree>) -> Result<Self, ArtifactError> {
        if trees.is_empty() {
            return Err(ArtifactError::Invalid {
                artifact: ARTIFACT,
                reason: "tree ensemble has no trees".to_string(),
            });
        }
        if !base_score.is_finite() {
            return Err(ArtifactError::Invalid {
                artifact: ARTIFACT,
                reason: "base_score must be finite".to_string(),
            });
        }
        for (idx, tree) in trees.iter().enumerate() {
            tree.validate(idx)?;
        }
        Ok(Self {
            base_score,
            aggregation,
            trees,
        })
    }
}

impl Model for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> f64 {
        let total: f64 = self.trees.iter().map(|t| t.evaluate(features)).sum();
        match self.aggregation {
            Aggregation::Sum => self.base_score + total,
            Aggregation::Mean => self.base_score + total / self.trees.len() as f64,
        }
    }

    fn describe(&self) -> String {
        let agg = match self.aggregation {
            Aggregation::Sum => "boosted",
            Aggregation::Mean => "averaged",
        };
        format!("tree ensemble ({} trees, {agg})", self.trees.len())
    }
}
