//! A trained model of either kind, with JSON persistence.
//!
//! # Example
//! ```no_run
//! use dtboost::config::{Config, Learner};
//! use dtboost::decision_tree::Example;
//! use dtboost::hypothesis::Hypothesis;
//! use dtboost::model::Model;
//!
//! let dv = vec![
//!     Example::new(vec![true, false], "nl"),
//!     Example::new(vec![false, true], "en"),
//! ];
//! let mut cfg = Config::new();
//! cfg.set_learner(Learner::AdaBoost);
//! cfg.set_iterations(10);
//!
//! let model = Model::train(&cfg, &dv).expect("failed to train the model");
//! model.save_model("dtboost.model").expect("failed to save the model");
//!
//! let model = Model::load_model("dtboost.model").expect("failed to load the model");
//! println!("{}", model.ask(&[true, true]).expect("failed to ask"));
//! ```

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

#[cfg(feature = "enable_training")]
use crate::adaboost::AdaBoost;
use crate::adaboost::Ensemble;
#[cfg(feature = "enable_training")]
use crate::config::Config;
use crate::config::Learner;
#[cfg(feature = "enable_training")]
use crate::decision_tree::{decision_tree_learn, Example};
use crate::decision_tree::DecisionTree;
#[cfg(feature = "enable_training")]
use crate::errors::LearnError;
use crate::errors::Result;
use crate::hypothesis::Hypothesis;

#[cfg(feature = "enable_training")]
use log::info;
use serde_derive::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Model {
    DecisionTree(DecisionTree),
    Ensemble(Ensemble),
}

impl Model {
    /// Train the model chosen by `cfg.learner` on `examples`, using attributes
    /// `0..cfg.feature_size`.
    #[cfg(feature = "enable_training")]
    pub fn train(cfg: &Config, examples: &[Example]) -> Result<Model> {
        let feature_size = if cfg.feature_size > 0 {
            cfg.feature_size
        } else {
            examples
                .first()
                .map(|e| e.features.len())
                .ok_or(LearnError::EmptyExamples)?
        };
        let attrs: Vec<usize> = (0..feature_size).collect();
        info!(
            "training {:?} on {} examples with {} features",
            cfg.learner,
            examples.len(),
            feature_size
        );

        let model = match cfg.learner {
            Learner::DecisionTree => {
                let tree = decision_tree_learn(examples, &attrs, examples, cfg.max_depth, &cfg.labels)?;
                if cfg.debug {
                    info!("trained tree:\n{}", tree);
                }
                Model::DecisionTree(tree)
            }
            Learner::AdaBoost => {
                let mut booster = AdaBoost::new(examples, &attrs, &cfg.labels)?;
                for _ in 0..cfg.iterations {
                    let summary = booster.boost_round(None)?;
                    if cfg.debug {
                        info!(
                            "round {}: attribute {:?}, error {}, confidence {}",
                            summary.round, summary.attribute, summary.error, summary.confidence
                        );
                    }
                }
                Model::Ensemble(booster.into_ensemble()?)
            }
        };
        info!("training finished");
        Ok(model)
    }

    pub fn learner(&self) -> Learner {
        match self {
            Model::DecisionTree(_) => Learner::DecisionTree,
            Model::Ensemble(_) => Learner::AdaBoost,
        }
    }

    /// Save the model to a file using serde.
    pub fn save_model<P: AsRef<Path>>(&self, filename: P) -> Result<()> {
        let mut file = File::create(filename)?;
        let serialized = serde_json::to_string(self)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }

    /// Load a model saved by [`save_model`].
    ///
    /// [`save_model`]: #method.save_model
    pub fn load_model<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let mut file = File::open(filename)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let trained_model: Model = serde_json::from_str(&contents)?;
        Ok(trained_model)
    }
}

impl Hypothesis for Model {
    fn ask(&self, features: &[bool]) -> Result<&str> {
        match self {
            Model::DecisionTree(tree) => tree.ask(features),
            Model::Ensemble(ensemble) => ensemble.ask(features),
        }
    }
}

impl From<DecisionTree> for Model {
    fn from(tree: DecisionTree) -> Self {
        Model::DecisionTree(tree)
    }
}

impl From<Ensemble> for Model {
    fn from(ensemble: Ensemble) -> Self {
        Model::Ensemble(ensemble)
    }
}
