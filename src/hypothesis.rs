//! The contract shared by every trained predictor.

use crate::errors::Result;

/// A trained predictor mapping a boolean feature vector to a class label.
///
/// Implementations are immutable once built, so `ask` can be called from
/// several threads against one hypothesis.
pub trait Hypothesis {
    /// Predicts the label of one feature vector.
    ///
    /// Fails with [`LearnError::AttributeOutOfRange`] when the hypothesis reads
    /// an index that `features` does not have.
    ///
    /// [`LearnError::AttributeOutOfRange`]: ../errors/enum.LearnError.html
    fn ask(&self, features: &[bool]) -> Result<&str>;

    /// Predicts the labels of the given feature vectors.
    fn ask_all(&self, rows: &[Vec<bool>]) -> Result<Vec<String>> {
        rows.iter()
            .map(|row| self.ask(row).map(str::to_owned))
            .collect()
    }
}
