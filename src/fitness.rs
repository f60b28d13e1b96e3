//! This module implements the statistics used by tree induction and boosting:
//! majority labels, entropy, remainders and attribute selection.
//!
//! The helpers work on a slice of examples plus a `subset` of indices into it,
//! with an optional weight vector aligned with the full slice. `None` weights
//! count every example once.

use crate::decision_tree::{Example, LabelSet};
use crate::errors::{LearnError, Result};
use crate::hypothesis::Hypothesis;

/// Returned by [`log2`] for an argument of zero.
///
/// [`log2`]: fn.log2.html
pub const LOG2_ZERO: f64 = f64::MIN_POSITIVE;

/// Comparison that return true if the difference between `a` and `b` is less than `thrs`.
pub fn almost_equal_thrs(a: f64, b: f64, thrs: f64) -> bool {
    (a - b).abs() < thrs
}

/// Comparison with a threshold of 1.0e-9.
pub fn almost_equal(a: f64, b: f64) -> bool {
    almost_equal_thrs(a, b, 1.0e-9)
}

#[inline]
fn weight_of(weights: Option<&[f64]>, index: usize) -> f64 {
    weights.map_or(1.0, |w| w[index])
}

/// Label with the greatest mass among `subset`, scanning left to right. The
/// leader only changes on a strict improvement, so the earlier label wins ties.
pub(crate) fn majority_in<'a>(
    examples: &'a [Example],
    subset: &[usize],
    weights: Option<&[f64]>,
) -> Option<&'a str> {
    let mut tallies: Vec<(&str, f64)> = Vec::with_capacity(2);
    let mut leader: Option<(&str, f64)> = None;
    for &i in subset {
        let label = examples[i].label.as_str();
        let w = weight_of(weights, i);
        let total = match tallies.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => {
                entry.1 += w;
                entry.1
            }
            None => {
                tallies.push((label, w));
                w
            }
        };
        if leader.map_or(true, |(_, best)| total > best) {
            leader = Some((label, total));
        }
    }
    leader.map(|(label, _)| label)
}

/// Return the most frequent label of `examples`.
///
/// # Example
/// ```
/// use dtboost::decision_tree::Example;
/// use dtboost::fitness::count_majority;
/// let dv = vec![
///     Example::new(vec![], "nl"),
///     Example::new(vec![], "nl"),
///     Example::new(vec![], "en"),
/// ];
/// assert_eq!("nl", count_majority(&dv).unwrap());
/// ```
pub fn count_majority(examples: &[Example]) -> Result<&str> {
    let all: Vec<usize> = (0..examples.len()).collect();
    majority_in(examples, &all, None).ok_or(LearnError::EmptyExamples)
}

/// Return the label of `examples` carrying the most weight. `weights[i]`
/// belongs to `examples[i]`.
pub fn weighted_count_majority<'a>(examples: &'a [Example], weights: &[f64]) -> Result<&'a str> {
    check_weights(examples, weights)?;
    let all: Vec<usize> = (0..examples.len()).collect();
    majority_in(examples, &all, Some(weights)).ok_or(LearnError::EmptyExamples)
}

pub(crate) fn check_weights(examples: &[Example], weights: &[f64]) -> Result<()> {
    if examples.len() != weights.len() {
        return Err(LearnError::WeightsMismatch {
            examples: examples.len(),
            weights: weights.len(),
        });
    }
    Ok(())
}

/// Check that all examples have the same feature size, that every attribute
/// exists and that every weight has an example. Return the feature size.
pub(crate) fn validate(examples: &[Example], attrs: &[usize], weights: Option<&[f64]>) -> Result<usize> {
    if let Some(w) = weights {
        check_weights(examples, w)?;
    }
    let feature_size = match examples.first() {
        Some(e) => e.features.len(),
        None => return Ok(0),
    };
    for (index, e) in examples.iter().enumerate() {
        if e.features.len() != feature_size {
            return Err(LearnError::InconsistentFeatures {
                index,
                expected: feature_size,
                found: e.features.len(),
            });
        }
    }
    if let Some(&attribute) = attrs.iter().find(|&&a| a >= feature_size) {
        return Err(LearnError::AttributeOutOfRange {
            attribute,
            len: feature_size,
        });
    }
    Ok(feature_size)
}

/// Return whether every example in `subset` has the same label. An empty subset
/// is not considered uniform.
pub(crate) fn same_classification_in(examples: &[Example], subset: &[usize]) -> bool {
    match subset.split_first() {
        None => false,
        Some((first, rest)) => {
            let label = &examples[*first].label;
            rest.iter().all(|&i| examples[i].label == *label)
        }
    }
}

/// Return whether all `examples` share one label.
pub fn same_classification(examples: &[Example]) -> bool {
    let all: Vec<usize> = (0..examples.len()).collect();
    same_classification_in(examples, &all)
}

/// Divide every weight by the sum of all weights.
///
/// # Example
/// ```
/// use dtboost::fitness::{almost_equal, normalize};
/// let mut w = vec![1.0, 3.0];
/// normalize(&mut w).unwrap();
/// assert!(almost_equal(0.25, w[0]));
/// ```
pub fn normalize(weights: &mut [f64]) -> Result<()> {
    let total: f64 = weights.iter().sum();
    if total == 0.0 || !total.is_finite() {
        return Err(LearnError::ZeroWeightSum);
    }
    for w in weights.iter_mut() {
        *w /= total;
    }
    Ok(())
}

/// Base 2 logarithm. Zero maps to [`LOG2_ZERO`] instead of negative infinity.
///
/// [`LOG2_ZERO`]: constant.LOG2_ZERO.html
pub fn log2(number: f64) -> f64 {
    if number == 0.0 {
        return LOG2_ZERO;
    }
    number.ln() / std::f64::consts::LN_2
}

/// Entropy of a boolean variable that is true with probability `q`.
pub fn entropy(q: f64) -> f64 {
    if q == 0.0 || q == 1.0 {
        return 0.0;
    }
    -(q * log2(q) + (1.0 - q) * log2(1.0 - q))
}

/// Expected entropy left after splitting `subset` on `attribute`.
pub(crate) fn remainder_in(
    examples: &[Example],
    subset: &[usize],
    attribute: usize,
    weights: Option<&[f64]>,
    labels: &LabelSet,
) -> f64 {
    // index 0 collects the false side, 1 the true side
    let mut mass = [0.0f64; 2];
    let mut positive = [0.0f64; 2];
    let mut total = 0.0;
    for &i in subset {
        let example = &examples[i];
        let side = example.features[attribute] as usize;
        let w = weight_of(weights, i);
        mass[side] += w;
        if labels.is_positive(&example.label) {
            positive[side] += w;
        }
        total += w;
    }
    if total <= 0.0 {
        return 0.0;
    }

    let mut remainder = 0.0;
    for &side in &[1, 0] {
        if mass[side] > 0.0 {
            remainder += mass[side] / total * entropy(positive[side] / mass[side]);
        }
    }
    remainder
}

/// Expected entropy left after splitting all `examples` on `attribute`.
pub fn remainder(
    examples: &[Example],
    attribute: usize,
    weights: Option<&[f64]>,
    labels: &LabelSet,
) -> Result<f64> {
    validate(examples, &[attribute], weights)?;
    let all: Vec<usize> = (0..examples.len()).collect();
    Ok(remainder_in(examples, &all, attribute, weights, labels))
}

/// The candidate from `attrs` with the smallest remainder over `subset`. The
/// first candidate wins ties. `None` if `attrs` is empty.
pub(crate) fn most_important_in(
    examples: &[Example],
    subset: &[usize],
    attrs: &[usize],
    weights: Option<&[f64]>,
    labels: &LabelSet,
) -> Option<usize> {
    let mut champion: Option<(usize, f64)> = None;
    for &attribute in attrs {
        let rem = remainder_in(examples, subset, attribute, weights, labels);
        if champion.map_or(true, |(_, best)| rem < best) {
            champion = Some((attribute, rem));
        }
    }
    champion.map(|(attribute, _)| attribute)
}

/// The attribute of `attrs` with the highest information gain over `examples`.
pub fn most_important(
    examples: &[Example],
    attrs: &[usize],
    weights: Option<&[f64]>,
    labels: &LabelSet,
) -> Result<Option<usize>> {
    validate(examples, attrs, weights)?;
    let all: Vec<usize> = (0..examples.len()).collect();
    Ok(most_important_in(examples, &all, attrs, weights, labels))
}

/// Sum of the weights of the examples `hypothesis` gets wrong.
pub fn weighted_error<H: Hypothesis + ?Sized>(
    hypothesis: &H,
    examples: &[Example],
    weights: &[f64],
) -> Result<f64> {
    check_weights(examples, weights)?;
    let mut error = 0.0f64;
    for (example, w) in examples.iter().zip(weights) {
        if hypothesis.ask(&example.features)? != example.label {
            error += w;
        }
    }
    Ok(error)
}

/// Fraction of `examples` that `hypothesis` labels correctly.
pub fn accuracy<H: Hypothesis + ?Sized>(hypothesis: &H, examples: &[Example]) -> Result<f64> {
    if examples.is_empty() {
        return Err(LearnError::EmptyExamples);
    }
    let mut correct = 0usize;
    for example in examples {
        if hypothesis.ask(&example.features)? == example.label {
            correct += 1;
        }
    }
    Ok(correct as f64 / examples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision_tree::DecisionTree;
    use rand::Rng;

    fn ex(features: &[bool], label: &str) -> Example {
        Example::new(features.to_vec(), label)
    }

    #[test]
    fn plain_majority() {
        let dv = vec![ex(&[], "nl"), ex(&[], "nl"), ex(&[], "en")];
        assert_eq!("nl", count_majority(&dv).unwrap());
    }

    #[test]
    fn majority_tie_keeps_first_label() {
        let dv = vec![ex(&[], "en"), ex(&[], "nl"), ex(&[], "nl"), ex(&[], "en")];
        assert_eq!("en", count_majority(&dv).unwrap());
    }

    #[test]
    fn weighted_majority() {
        let dv = vec![ex(&[], "en"), ex(&[], "nl")];
        assert_eq!("en", weighted_count_majority(&dv, &[0.7, 0.3]).unwrap());
        assert_eq!("nl", weighted_count_majority(&dv, &[0.3, 0.7]).unwrap());
    }

    #[test]
    fn weighted_majority_outweighs_count() {
        let dv = vec![ex(&[], "nl"), ex(&[], "nl"), ex(&[], "en")];
        assert_eq!("en", weighted_count_majority(&dv, &[0.2, 0.2, 0.6]).unwrap());
    }

    #[test]
    fn majority_of_nothing_fails() {
        assert!(matches!(count_majority(&[]), Err(LearnError::EmptyExamples)));
        let dv = vec![ex(&[], "nl")];
        assert!(matches!(
            weighted_count_majority(&dv, &[0.5, 0.5]),
            Err(LearnError::WeightsMismatch { .. })
        ));
    }

    #[test]
    fn uniform_labels() {
        assert!(!same_classification(&[]));
        assert!(same_classification(&[ex(&[], "en"), ex(&[], "en")]));
        assert!(!same_classification(&[ex(&[], "en"), ex(&[], "nl")]));
    }

    #[test]
    fn entropy_bounds() {
        assert_eq!(0.0, entropy(0.0));
        assert_eq!(0.0, entropy(1.0));
        assert!(almost_equal(1.0, entropy(0.5)));
        assert!(almost_equal(entropy(0.2), entropy(0.8)));
        assert_eq!(LOG2_ZERO, log2(0.0));
        assert!(almost_equal(3.0, log2(8.0)));
    }

    #[test]
    fn normalize_random_vectors() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let n = rng.gen_range(1..50);
            let mut w: Vec<f64> = (0..n).map(|_| rng.gen_range(1.0e-6..10.0)).collect();
            normalize(&mut w).unwrap();
            let total: f64 = w.iter().sum();
            assert!(almost_equal(1.0, total));
        }
    }

    #[test]
    fn normalize_zero_sum_fails() {
        let mut w = vec![0.0, 0.0];
        assert!(matches!(normalize(&mut w), Err(LearnError::ZeroWeightSum)));
    }

    // feature 0 predicts the label exactly, feature 1 is noise
    fn synthetic() -> Vec<Example> {
        vec![
            ex(&[true, true], "nl"),
            ex(&[true, false], "nl"),
            ex(&[false, true], "en"),
            ex(&[false, false], "en"),
        ]
    }

    #[test]
    fn remainder_of_perfect_and_useless_split() {
        let labels = LabelSet::default();
        let dv = synthetic();
        assert!(almost_equal(0.0, remainder(&dv, 0, None, &labels).unwrap()));
        assert!(almost_equal(1.0, remainder(&dv, 1, None, &labels).unwrap()));
    }

    #[test]
    fn most_important_prefers_gain() {
        let labels = LabelSet::default();
        let dv = synthetic();
        assert_eq!(Some(0), most_important(&dv, &[1, 0], None, &labels).unwrap());
        assert_eq!(Some(0), most_important(&dv, &[0, 1], None, &labels).unwrap());
        assert_eq!(None, most_important(&dv, &[], None, &labels).unwrap());
    }

    #[test]
    fn most_important_tie_keeps_first_candidate() {
        let labels = LabelSet::default();
        // both columns are identical, so both remainders are equal
        let dv = vec![
            ex(&[true, true], "nl"),
            ex(&[true, true], "en"),
            ex(&[false, false], "en"),
            ex(&[false, false], "en"),
        ];
        assert_eq!(Some(1), most_important(&dv, &[1, 0], None, &labels).unwrap());
        assert_eq!(Some(0), most_important(&dv, &[0, 1], None, &labels).unwrap());
    }

    #[test]
    fn weights_change_the_chosen_attribute() {
        let labels = LabelSet::default();
        let dv = vec![
            ex(&[true, false], "nl"),
            ex(&[true, true], "nl"),
            ex(&[false, true], "en"),
            ex(&[true, true], "en"),
        ];
        // unweighted the two attributes tie; moving the mass off the last
        // example makes attribute 0 a near perfect split
        let w = [0.33, 0.33, 0.33, 0.01];
        assert_eq!(Some(1), most_important(&dv, &[1, 0], None, &labels).unwrap());
        let plain = remainder(&dv, 0, None, &labels).unwrap();
        let weighted = remainder(&dv, 0, Some(&w), &labels).unwrap();
        assert!(weighted < plain);
        assert_eq!(Some(0), most_important(&dv, &[1, 0], Some(&w), &labels).unwrap());
    }

    #[test]
    fn split_helpers_reject_bad_input() {
        let labels = LabelSet::default();
        let dv = vec![ex(&[true], "nl"), ex(&[false], "en")];
        assert!(matches!(
            remainder(&dv, 5, None, &labels),
            Err(LearnError::AttributeOutOfRange { attribute: 5, len: 1 })
        ));
        assert!(matches!(
            most_important(&dv, &[0], Some(&[0.5]), &labels),
            Err(LearnError::WeightsMismatch {
                examples: 2,
                weights: 1
            })
        ));
        let ragged = vec![ex(&[true, true], "nl"), ex(&[false], "en")];
        assert!(matches!(
            most_important(&ragged, &[0], None, &labels),
            Err(LearnError::InconsistentFeatures { index: 1, .. })
        ));
    }

    #[test]
    fn weighted_error_sums_the_mistakes() {
        let dv = synthetic();
        let stump = DecisionTree::stump(1, "en", "nl");
        // attribute 1 gets examples 1 and 2 wrong
        let error = weighted_error(&stump, &dv, &[0.1, 0.2, 0.3, 0.4]).unwrap();
        assert!(almost_equal(0.5, error));
        assert!(matches!(
            weighted_error(&stump, &dv, &[1.0]),
            Err(LearnError::WeightsMismatch { .. })
        ));
    }
}
