use ndarray::{ArrayView1, ArrayView2, Axis};
use std::fmt;

use super::error::ClassifierError;

/// A pre-fit disease classifier over binary symptom vectors.
///
/// Implementations wrap a fitted model exported from the training environment.
/// They never learn anything at runtime: the feature order and the label set are
/// fixed when the model is loaded.
///
/// The classifier is expected to:
/// - Accept a batch of shape `[batch_size, feature_count]` where every row follows
///   the order returned by [`feature_names`](DiseaseClassifier::feature_names)
/// - Return exactly one encoded label per row
/// - Be deterministic for a given input
pub trait DiseaseClassifier: fmt::Debug + Send + Sync {
    /// Returns the ordered feature names the model was fit on
    fn feature_names(&self) -> &[String];

    /// Runs the model over a batch of rows and returns one encoded label per row.
    ///
    /// # Errors
    /// - `ModelError` if the underlying runtime fails
    /// - `PredictionError` if the model output cannot be interpreted
    fn predict_batch(&self, batch: ArrayView2<'_, f32>) -> Result<Vec<i64>, ClassifierError>;

    /// Number of features each input row must carry
    fn feature_count(&self) -> usize {
        self.feature_names().len()
    }

    /// Predicts the encoded label for a single row.
    ///
    /// The row is checked against the model's feature count before it reaches the
    /// model, so a mismatched vector surfaces as `FeatureMismatch` rather than an
    /// opaque runtime error.
    fn predict_one(&self, row: ArrayView1<'_, f32>) -> Result<i64, ClassifierError> {
        let expected = self.feature_count();
        if row.len() != expected {
            return Err(ClassifierError::FeatureMismatch { expected, actual: row.len() });
        }

        let batch = row.insert_axis(Axis(0));
        let labels = self.predict_batch(batch)?;
        labels.first().copied().ok_or_else(|| {
            ClassifierError::PredictionError("Model returned no label for a single-row batch".into())
        })
    }
}
