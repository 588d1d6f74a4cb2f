//! Price Predictor
//!
//! Loads a pre-trained XGBoost regression artifact (the JSON interchange
//! format written by `save_model`) and evaluates the tree ensemble
//! directly. The model is loaded once at startup and shared read-only
//! for the life of the process; prediction is a pure function of the
//! feature vector.
//!
//! The artifact's feature schema is validated against
//! [`FEATURE_NAMES`](crate::attributes::FEATURE_NAMES) at load time: a
//! column-order mismatch would otherwise corrupt every prediction
//! silently.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Deserialize;

use crate::attributes::{FEATURE_NAMES, FeatureVector};
use crate::error::{AdvisorError, Result};

/// A price estimate in USD. Always non-negative; the model produces no
/// confidence interval and none is fabricated here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PricePrediction {
    pub usd: Decimal,
}

// ============================================================================
// Artifact wire format (XGBoost JSON)
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawArtifact {
    learner: RawLearner,
}

#[derive(Debug, Deserialize)]
struct RawLearner {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: RawBooster,
    learner_model_param: RawLearnerModelParam,
}

#[derive(Debug, Deserialize)]
struct RawLearnerModelParam {
    /// XGBoost serializes numeric params as strings (e.g. "5E-1")
    base_score: String,
    #[serde(default)]
    num_feature: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBooster {
    model: RawBoosterModel,
}

#[derive(Debug, Deserialize)]
struct RawBoosterModel {
    trees: Vec<RawTree>,
}

#[derive(Debug, Deserialize)]
struct RawTree {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<u32>,
    /// Split threshold for interior nodes, leaf value for leaves
    split_conditions: Vec<f64>,
    #[serde(default)]
    default_left: Vec<Flag>,
}

/// XGBoost versions disagree on whether flags are 0/1 or booleans
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn as_bool(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

// ============================================================================
// Evaluated model
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Node {
    left: i32,
    right: i32,
    split_index: usize,
    /// Threshold for interior nodes, leaf value for leaves
    split_condition: f64,
    default_left: bool,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Walk from the root to a leaf. Missing (NaN) features follow the
    /// tree's default direction.
    fn leaf_value(&self, features: &[f64; 9]) -> f64 {
        let mut idx = 0usize;
        loop {
            let node = self.nodes[idx];
            if node.left < 0 {
                return node.split_condition;
            }

            let value = features[node.split_index];
            let go_left = if value.is_nan() {
                node.default_left
            } else {
                value < node.split_condition
            };

            idx = if go_left {
                node.left as usize
            } else {
                node.right as usize
            };
        }
    }
}

/// Gradient-boosted tree regression model.
///
/// Immutable after load; safe to share across concurrent readers.
pub struct GbtModel {
    trees: Vec<Tree>,
    base_score: f64,
}

impl GbtModel {
    /// Load the artifact from disk. Failure here is unrecoverable for
    /// the process and should abort startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AdvisorError::ModelLoad(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&raw)
    }

    /// Parse an artifact from its JSON text
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let artifact: RawArtifact = serde_json::from_str(raw)
            .map_err(|e| AdvisorError::ModelLoad(format!("malformed artifact: {}", e)))?;

        let learner = artifact.learner;
        Self::validate_schema(&learner)?;

        let base_score: f64 = learner
            .learner_model_param
            .base_score
            .parse()
            .map_err(|_| {
                AdvisorError::ModelLoad(format!(
                    "unparseable base_score: {:?}",
                    learner.learner_model_param.base_score
                ))
            })?;

        let mut trees = Vec::with_capacity(learner.gradient_booster.model.trees.len());
        for (i, raw_tree) in learner.gradient_booster.model.trees.into_iter().enumerate() {
            trees.push(Self::build_tree(i, raw_tree)?);
        }

        if trees.is_empty() {
            return Err(AdvisorError::ModelLoad("artifact contains no trees".into()));
        }

        Ok(Self { trees, base_score })
    }

    /// The artifact must agree with the encoder on feature names, order,
    /// and count. A mismatch is a silent-corruption risk, so it is a
    /// hard load error, not a warning.
    fn validate_schema(learner: &RawLearner) -> Result<()> {
        if !learner.feature_names.is_empty() && learner.feature_names != FEATURE_NAMES {
            return Err(AdvisorError::SchemaMismatch {
                expected: FEATURE_NAMES.iter().map(|s| (*s).to_string()).collect(),
                found: learner.feature_names.clone(),
            });
        }

        if let Some(num_feature) = &learner.learner_model_param.num_feature {
            let count: usize = num_feature.parse().map_err(|_| {
                AdvisorError::ModelLoad(format!("unparseable num_feature: {:?}", num_feature))
            })?;
            if count != FEATURE_NAMES.len() {
                return Err(AdvisorError::ModelLoad(format!(
                    "artifact expects {} features, encoder produces {}",
                    count,
                    FEATURE_NAMES.len()
                )));
            }
        }

        Ok(())
    }

    fn build_tree(index: usize, raw: RawTree) -> Result<Tree> {
        let n = raw.left_children.len();
        if raw.right_children.len() != n
            || raw.split_indices.len() != n
            || raw.split_conditions.len() != n
        {
            return Err(AdvisorError::ModelLoad(format!(
                "tree {} has inconsistent node arrays",
                index
            )));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (left, right) = (raw.left_children[i], raw.right_children[i]);
            if left >= n as i32 || right >= n as i32 {
                return Err(AdvisorError::ModelLoad(format!(
                    "tree {} node {} references child outside the tree",
                    index, i
                )));
            }

            let split_index = raw.split_indices[i] as usize;
            if left >= 0 && split_index >= FEATURE_NAMES.len() {
                return Err(AdvisorError::ModelLoad(format!(
                    "tree {} node {} splits on feature {} (only {} features)",
                    index,
                    i,
                    split_index,
                    FEATURE_NAMES.len()
                )));
            }

            nodes.push(Node {
                left,
                right,
                split_index,
                split_condition: raw.split_conditions[i],
                default_left: raw.default_left.get(i).is_some_and(|f| f.as_bool()),
            });
        }

        Ok(Tree { nodes })
    }

    /// Number of trees in the ensemble
    pub fn tree_count(&self) -> usize {
        self.trees.len()
    }

    /// Predict a USD price for an encoded feature vector.
    ///
    /// Deterministic: identical inputs always produce identical outputs.
    /// The raw forest sum is floored at zero since a price cannot be
    /// negative.
    pub fn predict(&self, features: &FeatureVector) -> Result<PricePrediction> {
        let columns = features.as_array();

        let raw: f64 = self.base_score
            + self
                .trees
                .iter()
                .map(|tree| tree.leaf_value(columns))
                .sum::<f64>();

        if !raw.is_finite() {
            return Err(AdvisorError::Prediction(format!(
                "model produced non-finite value: {}",
                raw
            )));
        }

        let usd = Decimal::from_f64(raw.max(0.0))
            .ok_or_else(|| AdvisorError::Prediction(format!("unrepresentable value: {}", raw)))?;

        Ok(PricePrediction { usd })
    }
}
