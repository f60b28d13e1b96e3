//! This module implements decision tree induction over boolean features on top
//! of the arena tree in [`binary_tree`].
//!
//! Trees are grown by recursive information-gain induction: every internal
//! node tests one attribute, its left child answers for `false` and its right
//! child for `true`. The same routine grows weighted depth-limited stumps for
//! boosting.
//!
//! # Example
//! ```
//! use dtboost::decision_tree::{decision_tree_learn, Example, LabelSet};
//! use dtboost::hypothesis::Hypothesis;
//!
//! let dv = vec![
//!     Example::new(vec![true, false], "nl"),
//!     Example::new(vec![true, true], "nl"),
//!     Example::new(vec![false, true], "en"),
//!     Example::new(vec![false, false], "en"),
//! ];
//! let labels = LabelSet::default();
//! let tree = decision_tree_learn(&dv, &[0, 1], &dv, -1, &labels).unwrap();
//!
//! assert_eq!(Some(0), tree.root_attribute());
//! assert_eq!("nl", tree.ask(&[true, false]).unwrap());
//! assert_eq!("en", tree.ask(&[false, true]).unwrap());
//! ```
//!
//! [`binary_tree`]: ../binary_tree/index.html

use std::collections::BTreeMap;
use std::fmt;

use crate::binary_tree::{BinaryTree, BinaryTreeNode, TreeIndex};
use crate::errors::{LearnError, Result};
#[cfg(feature = "enable_training")]
use crate::fitness::{majority_in, most_important_in, same_classification_in, validate};
use crate::hypothesis::Hypothesis;

#[cfg(feature = "enable_training")]
use log::{debug, warn};
use serde_derive::{Deserialize, Serialize};

/// A class label.
pub type Label = String;

/// A training sample: a boolean feature vector and its class label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// the vector of features, indexed by attribute
    pub features: Vec<bool>,
    /// the class label of the sample
    pub label: Label,
}

impl Example {
    /// Generate a sample.
    ///
    /// # Example
    /// ``` rust
    /// use dtboost::decision_tree::Example;
    /// let e = Example::new(vec![true, false, true], "nl");
    /// assert_eq!("nl", e.label);
    /// ```
    pub fn new<L: Into<Label>>(features: Vec<bool>, label: L) -> Self {
        Example {
            features,
            label: label.into(),
        }
    }
}

/// The vector of the samples
pub type ExampleVec = Vec<Example>;

/// The two labels a classifier chooses between. Remainders are computed from
/// the mass of `positive`, and an ensemble votes `positive` when its score is
/// not negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelSet {
    pub positive: Label,
    pub negative: Label,
}

impl Default for LabelSet {
    fn default() -> Self {
        LabelSet::new("nl", "en")
    }
}

impl LabelSet {
    pub fn new<P: Into<Label>, N: Into<Label>>(positive: P, negative: N) -> Self {
        LabelSet {
            positive: positive.into(),
            negative: negative.into(),
        }
    }

    pub fn is_positive(&self, label: &str) -> bool {
        self.positive == label
    }

    pub fn is_negative(&self, label: &str) -> bool {
        self.negative == label
    }

    pub fn contains(&self, label: &str) -> bool {
        self.is_positive(label) || self.is_negative(label)
    }

    /// Fail with `IdenticalLabels` if both labels are the same, then with
    /// `UnknownLabel` on the first example whose label is neither.
    pub fn check(&self, examples: &[Example]) -> Result<()> {
        if self.positive == self.negative {
            return Err(LearnError::IdenticalLabels(self.positive.clone()));
        }
        match examples.iter().find(|e| !self.contains(&e.label)) {
            Some(e) => Err(LearnError::UnknownLabel(e.label.clone())),
            None => Ok(()),
        }
    }
}

/// Counts how often each attribute was chosen for a split. Owned by the caller
/// and filled in by the training functions that accept one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeUsage {
    counts: BTreeMap<usize, usize>,
}

impl AttributeUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, attribute: usize) {
        *self.counts.entry(attribute).or_insert(0) += 1;
    }

    /// Number of splits made on `attribute`.
    pub fn count(&self, attribute: usize) -> usize {
        self.counts.get(&attribute).copied().unwrap_or(0)
    }

    /// Total number of recorded splits.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(attribute, count)` pairs in attribute order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(a, c)| (*a, *c))
    }
}

/// A node of the decision tree. It's stored in the `value` of the [`BinaryTreeNode`].
///
/// [`BinaryTreeNode`]: ../binary_tree/struct.BinaryTreeNode.html
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DTNode {
    /// Answers `label` whatever the input.
    Leaf { label: Label },
    /// Tests `features[attribute]`: the left child answers for false, the
    /// right child for true.
    Split { attribute: usize },
}

/// The decision tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    tree: BinaryTree<DTNode>,
}

impl DecisionTree {
    /// A tree made of one leaf.
    pub fn leaf<L: Into<Label>>(label: L) -> Self {
        let mut tree = BinaryTree::new();
        tree.add_root(BinaryTreeNode::new(DTNode::Leaf {
            label: label.into(),
        }));
        DecisionTree { tree }
    }

    /// A single split on `attribute` with a leaf on each side.
    ///
    /// # Example
    /// ```
    /// use dtboost::decision_tree::DecisionTree;
    /// use dtboost::hypothesis::Hypothesis;
    /// let stump = DecisionTree::stump(2, "en", "nl");
    /// assert_eq!("nl", stump.ask(&[false, false, true]).unwrap());
    /// assert_eq!("en", stump.ask(&[true, true, false]).unwrap());
    /// ```
    pub fn stump<F: Into<Label>, T: Into<Label>>(attribute: usize, if_false: F, if_true: T) -> Self {
        let mut tree = BinaryTree::new();
        let root = tree.add_root(BinaryTreeNode::new(DTNode::Split { attribute }));
        tree.add_left_node(
            root,
            BinaryTreeNode::new(DTNode::Leaf {
                label: if_false.into(),
            }),
        );
        tree.add_right_node(
            root,
            BinaryTreeNode::new(DTNode::Leaf {
                label: if_true.into(),
            }),
        );
        DecisionTree { tree }
    }

    /// The underlying arena tree.
    pub fn nodes(&self) -> &BinaryTree<DTNode> {
        &self.tree
    }

    pub fn root(&self) -> Option<&DTNode> {
        self.tree.get_root().map(|n| &n.value)
    }

    /// The attribute tested at the root, `None` for a leaf or an empty tree.
    pub fn root_attribute(&self) -> Option<usize> {
        match self.root() {
            Some(DTNode::Split { attribute }) => Some(*attribute),
            _ => None,
        }
    }

    /// The label of a single-leaf tree.
    pub fn leaf_label(&self) -> Option<&str> {
        match self.root() {
            Some(DTNode::Leaf { label }) if self.tree.len() == 1 => Some(label.as_str()),
            _ => None,
        }
    }

    /// Number of splits on the longest path.
    pub fn depth(&self) -> usize {
        self.tree.depth()
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Inference from the current `node`. A split needs both children even if
    /// only one of them is visited.
    fn ask_node<'a>(&'a self, node: &'a BinaryTreeNode<DTNode>, features: &[bool]) -> Result<&'a str> {
        match &node.value {
            DTNode::Leaf { label } => Ok(label.as_str()),
            DTNode::Split { attribute } => {
                let value = *features
                    .get(*attribute)
                    .ok_or(LearnError::AttributeOutOfRange {
                        attribute: *attribute,
                        len: features.len(),
                    })?;
                match (self.tree.get_left_child(node), self.tree.get_right_child(node)) {
                    (Some(left), Some(right)) => {
                        let child = if value { right } else { left };
                        self.ask_node(child, features)
                    }
                    _ => Err(LearnError::ChildrenNotFound(node.index())),
                }
            }
        }
    }
}

impl Hypothesis for DecisionTree {
    fn ask(&self, features: &[bool]) -> Result<&str> {
        let root = self.tree.get_root().ok_or(LearnError::EmptyTree)?;
        self.ask_node(root, features)
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut result = Ok(());
        self.tree.walk(|deep, node| {
            if result.is_err() {
                return;
            }
            let indent = "    ".repeat(deep);
            result = match &node.value {
                DTNode::Leaf { label } => writeln!(f, "{}----{}", indent, label),
                DTNode::Split { attribute } => writeln!(f, "{}----x[{}]", indent, attribute),
            };
        });
        result
    }
}

/// State of one induction run. Subsets are index lists into `examples`, so a
/// weight always stays with its example.
#[cfg(feature = "enable_training")]
struct Induction<'a, 'u> {
    examples: &'a [Example],
    weights: Option<&'a [f64]>,
    labels: &'a LabelSet,
    usage: Option<&'u mut AttributeUsage>,
    tree: BinaryTree<DTNode>,
}

#[cfg(feature = "enable_training")]
impl<'a, 'u> Induction<'a, 'u> {
    fn majority(&self, subset: &[usize]) -> Option<Label> {
        majority_in(self.examples, subset, self.weights).map(str::to_owned)
    }

    /// The label of the leaf to grow here, or `None` if the node should split.
    /// The order of the checks matters: later ones assume earlier ones failed.
    fn leaf_label(
        &self,
        subset: &[usize],
        parent_subset: &[usize],
        depth: i32,
    ) -> Result<Option<Label>> {
        if depth == 0 {
            if let Some(label) = self.majority(subset) {
                return Ok(Some(label));
            }
            warn!("empty branch at the depth limit, using the parent majority");
        }
        if subset.is_empty() {
            return self
                .majority(parent_subset)
                .map(Some)
                .ok_or(LearnError::EmptyExamples);
        }
        if same_classification_in(self.examples, subset) {
            return Ok(Some(self.examples[subset[0]].label.clone()));
        }
        Ok(None)
    }

    fn attach(&mut self, parent: Option<(TreeIndex, bool)>, value: DTNode) -> TreeIndex {
        let node = BinaryTreeNode::new(value);
        match parent {
            None => self.tree.add_root(node),
            Some((p, false)) => self.tree.add_left_node(p, node),
            Some((p, true)) => self.tree.add_right_node(p, node),
        }
    }

    /// Recursively grow the node hanging off `parent` (`None` for the root;
    /// the flag is the branch value). The false child is always built first.
    fn fit_node(
        &mut self,
        parent: Option<(TreeIndex, bool)>,
        subset: &[usize],
        parent_subset: &[usize],
        attrs: &[usize],
        depth: i32,
    ) -> Result<()> {
        if let Some(label) = self.leaf_label(subset, parent_subset, depth)? {
            self.attach(parent, DTNode::Leaf { label });
            return Ok(());
        }

        let attribute =
            match most_important_in(self.examples, subset, attrs, self.weights, self.labels) {
                Some(attribute) => attribute,
                None => {
                    // no attribute left to test
                    let label = self.majority(subset).ok_or(LearnError::EmptyExamples)?;
                    self.attach(parent, DTNode::Leaf { label });
                    return Ok(());
                }
            };

        if let Some(usage) = self.usage.as_deref_mut() {
            usage.record(attribute);
        }
        debug!(
            "split {} examples on attribute {} at depth {}",
            subset.len(),
            attribute,
            depth
        );

        let node = self.attach(parent, DTNode::Split { attribute });
        let remaining: Vec<usize> = attrs.iter().copied().filter(|&a| a != attribute).collect();
        let examples = self.examples;
        let (truthy, falsy): (Vec<usize>, Vec<usize>) = subset
            .iter()
            .copied()
            .partition(|&i| examples[i].features[attribute]);

        let next = depth.saturating_sub(1);
        self.fit_node(Some((node, false)), &falsy, subset, &remaining, next)?;
        self.fit_node(Some((node, true)), &truthy, subset, &remaining, next)
    }
}

/// Learn a decision tree from `examples` using the attributes in `attrs`.
///
/// `parent_examples` gives the majority when `examples` is empty; callers pass
/// `examples` again at the top level. A negative `depth` means no depth limit,
/// `depth == 0` yields a single leaf with the majority label.
#[cfg(feature = "enable_training")]
pub fn decision_tree_learn(
    examples: &[Example],
    attrs: &[usize],
    parent_examples: &[Example],
    depth: i32,
    labels: &LabelSet,
) -> Result<DecisionTree> {
    if examples.is_empty() {
        let all: Vec<usize> = (0..parent_examples.len()).collect();
        return majority_in(parent_examples, &all, None)
            .map(DecisionTree::leaf)
            .ok_or(LearnError::EmptyExamples);
    }
    weighted_decision_tree_learn(examples, attrs, None, depth, labels, None)
}

/// Learn a decision tree with optional per-example `weights` (aligned with
/// `examples`). Majorities and remainders use the weights; `None` counts every
/// example once. Each chosen split is recorded in `usage` when one is given.
#[cfg(feature = "enable_training")]
pub fn weighted_decision_tree_learn(
    examples: &[Example],
    attrs: &[usize],
    weights: Option<&[f64]>,
    depth: i32,
    labels: &LabelSet,
    usage: Option<&mut AttributeUsage>,
) -> Result<DecisionTree> {
    if examples.is_empty() {
        return Err(LearnError::EmptyExamples);
    }
    validate(examples, attrs, weights)?;
    labels.check(examples)?;

    let mut induction = Induction {
        examples,
        weights,
        labels,
        usage,
        tree: BinaryTree::new(),
    };
    let all: Vec<usize> = (0..examples.len()).collect();
    induction.fit_node(None, &all, &all, attrs, depth)?;
    Ok(DecisionTree {
        tree: induction.tree,
    })
}

#[cfg(all(test, feature = "enable_training"))]
mod tests {
    use super::*;

    fn ex(features: &[bool], label: &str) -> Example {
        Example::new(features.to_vec(), label)
    }

    fn mixed() -> Vec<Example> {
        vec![
            ex(&[true, false], "nl"),
            ex(&[false, true], "en"),
            ex(&[true, true], "en"),
            ex(&[false, false], "en"),
        ]
    }

    #[test]
    fn uniform_labels_make_a_leaf() {
        let labels = LabelSet::default();
        let dv = vec![ex(&[true, false], "nl"), ex(&[false, true], "nl")];
        for depth in &[-1, 1, 5] {
            let tree = decision_tree_learn(&dv, &[0, 1], &dv, *depth, &labels).unwrap();
            assert_eq!(Some("nl"), tree.leaf_label());
        }
    }

    #[test]
    fn depth_zero_makes_a_majority_leaf() {
        let labels = LabelSet::default();
        let dv = mixed();
        let tree = decision_tree_learn(&dv, &[0, 1], &dv, 0, &labels).unwrap();
        assert_eq!(Some("en"), tree.leaf_label());

        // depth 0 wins over the uniform label check as well
        let uniform = vec![ex(&[true, false], "nl")];
        let tree = decision_tree_learn(&uniform, &[0, 1], &uniform, 0, &labels).unwrap();
        assert_eq!(Some("nl"), tree.leaf_label());
    }

    #[test]
    fn empty_examples_use_parent_majority() {
        let labels = LabelSet::default();
        let parent = mixed();
        let tree = decision_tree_learn(&[], &[0, 1], &parent, -1, &labels).unwrap();
        assert_eq!(Some("en"), tree.leaf_label());

        assert!(matches!(
            decision_tree_learn(&[], &[0], &[], -1, &labels),
            Err(LearnError::EmptyExamples)
        ));
    }

    #[test]
    fn no_attributes_make_a_majority_leaf() {
        let labels = LabelSet::default();
        let dv = mixed();
        let tree = decision_tree_learn(&dv, &[], &dv, -1, &labels).unwrap();
        assert_eq!(Some("en"), tree.leaf_label());
    }

    #[test]
    fn unlimited_tree_fits_conjunction() {
        let labels = LabelSet::default();
        let dv = mixed();
        let tree = decision_tree_learn(&dv, &[0, 1], &dv, -1, &labels).unwrap();
        for e in &dv {
            assert_eq!(e.label, tree.ask(&e.features).unwrap());
        }
        assert_eq!(2, tree.depth());
    }

    #[test]
    fn depth_limit_caps_the_tree() {
        let labels = LabelSet::default();
        let dv = mixed();
        let tree = decision_tree_learn(&dv, &[0, 1], &dv, 1, &labels).unwrap();
        assert_eq!(1, tree.depth());
        assert_eq!(3, tree.len());
    }

    #[test]
    fn attribute_is_consumed_along_a_path() {
        let labels = LabelSet::default();
        // labels cannot be separated, so every path uses each attribute once
        let dv = vec![
            ex(&[true, true], "nl"),
            ex(&[true, true], "en"),
            ex(&[false, true], "nl"),
            ex(&[false, true], "en"),
        ];
        let mut usage = AttributeUsage::new();
        let tree =
            weighted_decision_tree_learn(&dv, &[0, 1], None, -1, &labels, Some(&mut usage)).unwrap();
        assert!(tree.depth() <= 2);
        assert_eq!(1, usage.count(0));
        assert!(usage.count(1) <= 2);
    }

    #[test]
    fn training_rejects_bad_input() {
        let labels = LabelSet::default();
        let ragged = vec![ex(&[true, false], "nl"), ex(&[true], "en")];
        assert!(matches!(
            decision_tree_learn(&ragged, &[0], &ragged, -1, &labels),
            Err(LearnError::InconsistentFeatures { index: 1, .. })
        ));

        let dv = mixed();
        assert!(matches!(
            decision_tree_learn(&dv, &[0, 2], &dv, -1, &labels),
            Err(LearnError::AttributeOutOfRange { attribute: 2, len: 2 })
        ));

        let odd = vec![ex(&[true], "fr"), ex(&[false], "en")];
        assert!(matches!(
            decision_tree_learn(&odd, &[0], &odd, -1, &labels),
            Err(LearnError::UnknownLabel(ref l)) if l == "fr"
        ));
    }

    #[test]
    fn ask_validates_input_and_structure() {
        let stump = DecisionTree::stump(3, "en", "nl");
        assert!(matches!(
            stump.ask(&[true]),
            Err(LearnError::AttributeOutOfRange { attribute: 3, len: 1 })
        ));

        let mut tree = BinaryTree::new();
        let root = tree.add_root(BinaryTreeNode::new(DTNode::Split { attribute: 0 }));
        tree.add_right_node(
            root,
            BinaryTreeNode::new(DTNode::Leaf {
                label: "nl".to_string(),
            }),
        );
        let broken = DecisionTree { tree };
        assert!(matches!(
            broken.ask(&[true]),
            Err(LearnError::ChildrenNotFound(0))
        ));

        let empty = DecisionTree {
            tree: BinaryTree::new(),
        };
        assert!(matches!(empty.ask(&[true]), Err(LearnError::EmptyTree)));
    }

    #[test]
    fn display_lists_nodes_in_order() {
        let stump = DecisionTree::stump(1, "en", "nl");
        assert_eq!("----x[1]\n    ----en\n    ----nl\n", stump.to_string());
    }

    #[test]
    fn identical_labels_are_rejected() {
        let labels = LabelSet::new("nl", "nl");
        let dv = vec![ex(&[true], "nl"), ex(&[false], "nl")];
        assert!(matches!(
            decision_tree_learn(&dv, &[0], &dv, -1, &labels),
            Err(LearnError::IdenticalLabels(ref l)) if l == "nl"
        ));
    }

    // attribute 0 is false everywhere, so splitting on it leaves an empty branch
    fn constant_first_feature() -> Vec<Example> {
        vec![
            ex(&[false, true], "nl"),
            ex(&[false, true], "en"),
            ex(&[false, false], "en"),
        ]
    }

    #[test]
    fn empty_branch_below_the_root_uses_parent_majority() {
        let labels = LabelSet::default();
        let dv = constant_first_feature();
        let tree = decision_tree_learn(&dv, &[0, 1], &dv, -1, &labels).unwrap();
        // x[1] splits first; under its true side x[0] has no true examples and
        // its parent {nl, en} ties, so the first label seen wins
        assert_eq!(
            "----x[1]\n    ----en\n    ----x[0]\n        ----nl\n        ----nl\n",
            tree.to_string()
        );
        assert_eq!("nl", tree.ask(&[true, true]).unwrap());
        assert_eq!("en", tree.ask(&[true, false]).unwrap());
    }

    #[test]
    fn empty_branch_at_the_depth_limit_uses_weighted_parent_majority() {
        let labels = LabelSet::default();
        let dv = constant_first_feature();
        // unweighted the majority would be en
        let weights = [0.6, 0.3, 0.1];
        let stump =
            weighted_decision_tree_learn(&dv, &[0], Some(&weights), 1, &labels, None).unwrap();
        assert_eq!(Some(0), stump.root_attribute());
        assert_eq!("----x[0]\n    ----nl\n    ----nl\n", stump.to_string());

        let plain = weighted_decision_tree_learn(&dv, &[0], None, 1, &labels, None).unwrap();
        assert_eq!("----x[0]\n    ----en\n    ----en\n", plain.to_string());
    }
}
