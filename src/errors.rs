use std::io;

use thiserror::Error;

use crate::binary_tree::TreeIndex;

pub type Result<T> = std::result::Result<T, LearnError>;

#[derive(Debug, Error)]
pub enum LearnError {
    #[error("No examples to learn from")]
    EmptyExamples,
    #[error("Attribute {attribute} is out of range for a feature vector of length {len}")]
    AttributeOutOfRange { attribute: usize, len: usize },
    #[error("Example {index} has {found} features, expected {expected}")]
    InconsistentFeatures {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("Children not found for node {0}")]
    ChildrenNotFound(TreeIndex),
    #[error("Decision tree has no root node")]
    EmptyTree,
    #[error("{examples} examples but {weights} weights")]
    WeightsMismatch { examples: usize, weights: usize },
    #[error("Ensemble has {stumps} stumps but {confidences} confidences")]
    LengthMismatch { stumps: usize, confidences: usize },
    #[error("Positive and negative labels are both `{0}`")]
    IdenticalLabels(String),
    #[error("Label `{0}` is not in the label set")]
    UnknownLabel(String),
    #[error("Boosting round {round} misclassified all weight (error = {error})")]
    DegenerateRound { round: usize, error: f64 },
    #[error("Weights sum to zero")]
    ZeroWeightSum,
    #[error("Malformed input on line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },
    #[error("IO error: {0}")]
    IO(#[from] io::Error),
    #[error("SerdeJson error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
