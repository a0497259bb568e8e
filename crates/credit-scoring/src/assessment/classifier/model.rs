use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::features::Preprocessing;
use super::ClassifierError;

/// Which decision the estimator's positive output stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositiveClass {
    #[default]
    Denied,
    Approved,
}

/// Serialized classifier exported from the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    #[serde(default)]
    pub positive_class: PositiveClass,
    #[serde(default = "default_negate_years_working")]
    pub negate_years_working: bool,
    #[serde(flatten)]
    pub estimator: Estimator,
}

fn default_negate_years_working() -> bool {
    true
}

fn default_probability_threshold() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    Logistic {
        intercept: f64,
        coefficients: Vec<f64>,
        #[serde(default = "default_probability_threshold")]
        threshold: f64,
    },
    DecisionTree {
        nodes: Vec<TreeNode>,
    },
}

/// Node of a binary decision tree stored in a flat array, root first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        positive: bool,
    },
}

impl ModelArtifact {
    pub fn load(path: &Path) -> Result<Self, ClassifierError> {
        let raw = fs::read_to_string(path).map_err(|err| ClassifierError::ModelUnavailable {
            path: path.display().to_string(),
            reason: err.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|err| ClassifierError::ModelUnavailable {
            path: path.display().to_string(),
            reason: format!("model artifact could not be parsed: {err}"),
        })
    }

    pub fn preprocessing(&self) -> Preprocessing {
        Preprocessing {
            negate_years_working: self.negate_years_working,
        }
    }

    /// Check the estimator is usable with a vector of `feature_count` columns.
    pub fn check_compatible(&self, feature_count: usize) -> Result<(), ClassifierError> {
        match &self.estimator {
            Estimator::Logistic { coefficients, .. } => {
                if coefficients.len() != feature_count {
                    return Err(ClassifierError::FeatureMismatch {
                        expected: coefficients.len(),
                        found: feature_count,
                    });
                }
            }
            Estimator::DecisionTree { nodes } => {
                if nodes.is_empty() {
                    return Err(ClassifierError::InvalidArtifact(
                        "decision tree has no nodes".to_string(),
                    ));
                }
                for (index, node) in nodes.iter().enumerate() {
                    if let TreeNode::Split {
                        feature,
                        left,
                        right,
                        ..
                    } = node
                    {
                        if *feature >= feature_count {
                            return Err(ClassifierError::InvalidArtifact(format!(
                                "node {index} splits on column {feature} of {feature_count}"
                            )));
                        }
                        // Children must come later in the array so traversal always terminates.
                        for child in [*left, *right] {
                            if child <= index || child >= nodes.len() {
                                return Err(ClassifierError::InvalidArtifact(format!(
                                    "node {index} points to invalid child {child}"
                                )));
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Raw estimator output: `true` means the positive class.
    pub fn predict(&self, features: &[f64]) -> Result<bool, ClassifierError> {
        self.check_compatible(features.len())?;

        match &self.estimator {
            Estimator::Logistic {
                intercept,
                coefficients,
                threshold,
            } => {
                let margin = coefficients
                    .iter()
                    .zip(features)
                    .fold(*intercept, |acc, (weight, value)| acc + weight * value);
                let probability = 1.0 / (1.0 + (-margin).exp());
                Ok(probability >= *threshold)
            }
            Estimator::DecisionTree { nodes } => {
                let mut index = 0;
                loop {
                    match &nodes[index] {
                        TreeNode::Leaf { positive } => return Ok(*positive),
                        TreeNode::Split {
                            feature,
                            threshold,
                            left,
                            right,
                        } => {
                            index = if features[*feature] <= *threshold {
                                *left
                            } else {
                                *right
                            };
                        }
                    }
                }
            }
        }
    }
}
