//! This module implements the config for training a model.
//!

use std::fmt;

use crate::decision_tree::LabelSet;
use serde_derive::{Deserialize, Serialize};

/// Depth value meaning "grow until the examples run out".
pub const UNLIMITED_DEPTH: i32 = -1;

/// Default number of boosting rounds.
pub const DEFAULT_ITERATIONS: usize = 1200;

/// Which learning algorithm produces the model.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Learner {
    /// A single tree grown by information gain.
    DecisionTree,
    /// AdaBoost over decision stumps.
    AdaBoost,
}

impl Default for Learner {
    fn default() -> Self {
        Learner::DecisionTree
    }
}

/// Parse a learner name, ignoring case. Accepts `dt` and `ada` as well as the
/// full names.
pub fn string2learner(s: &str) -> Option<Learner> {
    match s.to_ascii_lowercase().as_str() {
        "dt" | "decisiontree" => Some(Learner::DecisionTree),
        "ada" | "adaboost" => Some(Learner::AdaBoost),
        _ => None,
    }
}

pub fn learner2string(l: &Learner) -> String {
    match l {
        Learner::DecisionTree => String::from("dt"),
        Learner::AdaBoost => String::from("ada"),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Number of attributes to learn from. 0 takes the length of the first example.
    pub feature_size: usize,
    /// Depth limit of a decision tree, negative for none. Stumps always have depth 1.
    pub max_depth: i32,
    /// Number of boosting rounds.
    pub iterations: usize,
    pub learner: Learner,
    pub labels: LabelSet,
    /// Log the trained tree or every boosting round at info level.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Config {
        Config {
            feature_size: 0,
            max_depth: UNLIMITED_DEPTH,
            iterations: DEFAULT_ITERATIONS,
            learner: Learner::DecisionTree,
            labels: LabelSet::default(),
            debug: false,
        }
    }

    pub fn set_feature_size(&mut self, n: usize) {
        self.feature_size = n;
    }

    pub fn set_max_depth(&mut self, n: i32) {
        self.max_depth = n;
    }

    pub fn set_iterations(&mut self, n: usize) {
        self.iterations = n;
    }

    pub fn set_learner(&mut self, l: Learner) {
        self.learner = l;
    }

    pub fn set_labels(&mut self, labels: LabelSet) {
        self.labels = labels;
    }

    pub fn set_debug(&mut self, option: bool) {
        self.debug = option;
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "number of features = {}", self.feature_size)?;
        writeln!(f, "maximum depth = {}", self.max_depth)?;
        writeln!(f, "iterations = {}", self.iterations)?;
        writeln!(f, "learner = {}", learner2string(&self.learner))?;
        writeln!(f, "positive label = {}", self.labels.positive)?;
        writeln!(f, "negative label = {}", self.labels.negative)?;
        writeln!(f, "debug enabled = {}", self.debug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn learner_names() {
        assert_eq!(Some(Learner::DecisionTree), string2learner("dt"));
        assert_eq!(Some(Learner::AdaBoost), string2learner("ADA"));
        assert_eq!(Some(Learner::AdaBoost), string2learner("AdaBoost"));
        assert_eq!(None, string2learner("svm"));
        for l in &[Learner::DecisionTree, Learner::AdaBoost] {
            assert_eq!(Some(*l), string2learner(&learner2string(l)));
        }
    }

    #[test]
    fn defaults() {
        let cfg = Config::new();
        assert_eq!(UNLIMITED_DEPTH, cfg.max_depth);
        assert_eq!(1200, cfg.iterations);
        assert_eq!("nl", cfg.labels.positive);
        assert!(cfg.to_string().contains("learner = dt\n"));
    }
}
