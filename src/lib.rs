//Copyright (C) 2017-2018 Baidu, Inc. All Rights Reserved.
//
//Redistribution and use in source and binary forms, with or without
//modification, are permitted provided that the following conditions
//are met:
//
// * Redistributions of source code must retain the above copyright
//   notice, this list of conditions and the following disclaimer.
//
// * Redistributions in binary form must reproduce the above copyright
//   notice, this list of conditions and the following disclaimer in
//   the documentation and/or other materials provided with the
//   distribution.
//
// * Neither the name of Baidu, Inc., nor the names of its
//   contributors may be used to endorse or promote products derived
//   from this software without specific prior written permission.
//
//THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS
//"AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT
//LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR
//A PARTICULAR PURPOSE ARE DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT
//OWNER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL,
//SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT
//LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR SERVICES; Loss OF USE,
//DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY
//THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT
//(INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
//OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

//! Binary classifiers over boolean feature vectors.
//!
//! Two learners are provided: a decision tree grown by information gain
//! ([`decision_tree::decision_tree_learn`]) and AdaBoost over decision stumps
//! ([`adaboost::adaboost_learn`]). Both produce a [`hypothesis::Hypothesis`]
//! that answers one of the two labels of a [`decision_tree::LabelSet`].
//!
//! # Example
//! ```rust
//! use dtboost::config::{Config, Learner};
//! use dtboost::decision_tree::Example;
//! use dtboost::hypothesis::Hypothesis;
//! use dtboost::model::Model;
//!
//! let dv = vec![
//!     Example::new(vec![true, true], "nl"),
//!     Example::new(vec![true, false], "nl"),
//!     Example::new(vec![false, true], "en"),
//!     Example::new(vec![false, false], "en"),
//! ];
//! let mut cfg = Config::new();
//! cfg.set_learner(Learner::AdaBoost);
//! cfg.set_iterations(5);
//! let model = Model::train(&cfg, &dv).unwrap();
//! assert_eq!("nl", model.ask(&[true, false]).unwrap());
//! ```

pub mod adaboost;
pub mod binary_tree;
pub mod config;
pub mod decision_tree;
pub mod errors;
pub mod fitness;
pub mod hypothesis;
#[cfg(feature = "input")]
pub mod input;
pub mod model;
