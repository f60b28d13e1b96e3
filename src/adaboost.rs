//! This module implements AdaBoost over decision stumps.
//!
//! Every round grows a depth-one tree on the current example weights, scores
//! its weighted error, shrinks the weights of the examples it got right and
//! records a confidence. The resulting [`Ensemble`] answers by a signed
//! weighted vote of its stumps.
//!
//! # Example
//! ```
//! use dtboost::adaboost::adaboost_learn;
//! use dtboost::decision_tree::{Example, LabelSet};
//! use dtboost::hypothesis::Hypothesis;
//!
//! let dv = vec![
//!     Example::new(vec![false, true], "nl"),
//!     Example::new(vec![true, true], "nl"),
//!     Example::new(vec![false, false], "en"),
//!     Example::new(vec![true, false], "en"),
//! ];
//! let ensemble = adaboost_learn(&dv, 3, &[0, 1], &LabelSet::default()).unwrap();
//! assert_eq!(3, ensemble.len());
//! assert_eq!("nl", ensemble.ask(&[false, true]).unwrap());
//! ```
//!
//! [`Ensemble`]: struct.Ensemble.html

use crate::decision_tree::{DecisionTree, Example, LabelSet};
#[cfg(feature = "enable_training")]
use crate::decision_tree::{weighted_decision_tree_learn, AttributeUsage};
use crate::errors::{LearnError, Result};
#[cfg(feature = "enable_training")]
use crate::fitness::{normalize, validate, weighted_error};
use crate::hypothesis::Hypothesis;

#[cfg(feature = "enable_training")]
use log::debug;
use serde_derive::{Deserialize, Serialize};

/// Depth of the weak learners.
pub const STUMP_DEPTH: i32 = 1;

/// Confidence given to a stump that classifies every example correctly.
pub const PERFECT_CONFIDENCE: f64 = f64::MAX;

/// Weighted vote over stumps. `confidences[k]` belongs to `stumps[k]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ensemble {
    stumps: Vec<DecisionTree>,
    confidences: Vec<f64>,
    labels: LabelSet,
}

impl Ensemble {
    /// Combine `stumps` with their `confidences`. Both must have the same length.
    pub fn new(stumps: Vec<DecisionTree>, confidences: Vec<f64>, labels: LabelSet) -> Result<Self> {
        if stumps.len() != confidences.len() {
            return Err(LearnError::LengthMismatch {
                stumps: stumps.len(),
                confidences: confidences.len(),
            });
        }
        Ok(Ensemble {
            stumps,
            confidences,
            labels,
        })
    }

    pub fn stumps(&self) -> &[DecisionTree] {
        &self.stumps
    }

    pub fn confidences(&self) -> &[f64] {
        &self.confidences
    }

    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.stumps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stumps.is_empty()
    }

    /// Sum of the confidences of the stumps voting positive minus those voting
    /// negative. Stumps answering any other label abstain.
    pub fn score(&self, features: &[bool]) -> Result<f64> {
        if self.stumps.len() != self.confidences.len() {
            return Err(LearnError::LengthMismatch {
                stumps: self.stumps.len(),
                confidences: self.confidences.len(),
            });
        }
        let mut score = 0.0f64;
        for (stump, z) in self.stumps.iter().zip(&self.confidences) {
            let label = stump.ask(features)?;
            if self.labels.is_positive(label) {
                score += z;
            } else if self.labels.is_negative(label) {
                score -= z;
            }
        }
        Ok(score)
    }

    fn threshold(&self, score: f64) -> &str {
        if score >= 0.0 {
            &self.labels.positive
        } else {
            &self.labels.negative
        }
    }
}

impl Hypothesis for Ensemble {
    fn ask(&self, features: &[bool]) -> Result<&str> {
        let score = self.score(features)?;
        Ok(self.threshold(score))
    }
}

/// What one boosting round produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundSummary {
    pub round: usize,
    /// attribute tested by the stump, `None` if it is a single leaf
    pub attribute: Option<usize>,
    pub error: f64,
    pub confidence: f64,
}

/// Runs boosting one round at a time over borrowed examples.
#[cfg(feature = "enable_training")]
pub struct AdaBoost<'a> {
    examples: &'a [Example],
    attrs: Vec<usize>,
    labels: LabelSet,
    weights: Vec<f64>,
    stumps: Vec<DecisionTree>,
    confidences: Vec<f64>,
}

#[cfg(feature = "enable_training")]
impl<'a> AdaBoost<'a> {
    /// Start boosting with uniform weights.
    pub fn new(examples: &'a [Example], attrs: &[usize], labels: &LabelSet) -> Result<Self> {
        if examples.is_empty() {
            return Err(LearnError::EmptyExamples);
        }
        validate(examples, attrs, None)?;
        labels.check(examples)?;

        let n = examples.len();
        Ok(AdaBoost {
            examples,
            attrs: attrs.to_vec(),
            labels: labels.clone(),
            weights: vec![1.0 / n as f64; n],
            stumps: Vec::new(),
            confidences: Vec::new(),
        })
    }

    /// Current example weights, aligned with the examples.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Number of rounds run so far.
    pub fn rounds(&self) -> usize {
        self.stumps.len()
    }

    /// Run one round. Splits chosen by the stump are recorded in `usage`.
    ///
    /// A round whose stump gets every example wrong cannot be given a finite
    /// confidence and fails with `DegenerateRound`.
    pub fn boost_round(&mut self, usage: Option<&mut AttributeUsage>) -> Result<RoundSummary> {
        let round = self.stumps.len();
        let stump = weighted_decision_tree_learn(
            self.examples,
            &self.attrs,
            Some(self.weights.as_slice()),
            STUMP_DEPTH,
            &self.labels,
            usage,
        )?;

        let error = weighted_error(&stump, self.examples, &self.weights)?;
        let confidence = if error == 0.0 {
            PERFECT_CONFIDENCE
        } else if error >= 1.0 {
            return Err(LearnError::DegenerateRound { round, error });
        } else {
            let factor = error / (1.0 - error);
            for (w, example) in self.weights.iter_mut().zip(self.examples) {
                if stump.ask(&example.features)? == example.label {
                    *w *= factor;
                }
            }
            normalize(&mut self.weights)?;
            ((1.0 - error) / error).ln()
        };

        let summary = RoundSummary {
            round,
            attribute: stump.root_attribute(),
            error,
            confidence,
        };
        debug!(
            "round {}: attribute {:?}, error {}, confidence {}",
            round, summary.attribute, error, confidence
        );
        self.stumps.push(stump);
        self.confidences.push(confidence);
        Ok(summary)
    }

    /// Finish boosting and return the stumps in round order.
    pub fn into_ensemble(self) -> Result<Ensemble> {
        Ensemble::new(self.stumps, self.confidences, self.labels)
    }
}

/// Boost `rounds` decision stumps over `examples` using the attributes in `attrs`.
#[cfg(feature = "enable_training")]
pub fn adaboost_learn(
    examples: &[Example],
    rounds: usize,
    attrs: &[usize],
    labels: &LabelSet,
) -> Result<Ensemble> {
    let mut booster = AdaBoost::new(examples, attrs, labels)?;
    for _ in 0..rounds {
        booster.boost_round(None)?;
    }
    booster.into_ensemble()
}

/// Same as [`adaboost_learn`], counting the attribute of every split in `usage`.
///
/// [`adaboost_learn`]: fn.adaboost_learn.html
#[cfg(feature = "enable_training")]
pub fn adaboost_learn_with_usage(
    examples: &[Example],
    rounds: usize,
    attrs: &[usize],
    labels: &LabelSet,
    usage: &mut AttributeUsage,
) -> Result<Ensemble> {
    let mut booster = AdaBoost::new(examples, attrs, labels)?;
    for _ in 0..rounds {
        booster.boost_round(Some(&mut *usage))?;
    }
    booster.into_ensemble()
}
