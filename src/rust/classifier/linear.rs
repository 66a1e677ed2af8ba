use std::fs;
use std::path::Path;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::Deserialize;

use super::error::ClassifierError;
use super::model::DiseaseClassifier;
use super::utils::argmax;

/// On-disk layout of a linear model export.
///
/// This mirrors the fitted attributes of a one-vs-rest linear classifier:
/// `coef` has one row per class (or a single row for a binary model) and one
/// column per feature.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModelFile {
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    pub coef: Vec<Vec<f32>>,
    pub intercept: Vec<f32>,
}

/// A linear classifier evaluated in-process with `ndarray`.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    feature_names: Vec<String>,
    classes: Vec<i64>,
    coef: Array2<f32>,
    intercept: Array1<f32>,
}

impl LinearClassifier {
    /// Loads a linear model export from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ClassifierError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ClassifierError::ModelError(format!("Failed to read model file {}: {}", path.display(), e))
        })?;
        let file: LinearModelFile = serde_json::from_str(&content).map_err(|e| {
            ClassifierError::ModelError(format!("Failed to parse model file {}: {}", path.display(), e))
        })?;
        Self::from_parts(file)
    }

    /// Builds a classifier from already-parsed parts.
    ///
    /// # Errors
    /// `ModelError` when the parts disagree on shape:
    /// - no features or no classes
    /// - a coefficient row whose length differs from the feature count
    /// - a row count that is neither the class count nor 1 for a binary model
    /// - an intercept whose length differs from the row count
    pub fn from_parts(file: LinearModelFile) -> Result<Self, ClassifierError> {
        let LinearModelFile { feature_names, classes, coef, intercept } = file;
        let n_features = feature_names.len();

        if n_features == 0 {
            return Err(ClassifierError::ModelError("Model has no feature names".into()));
        }
        if classes.len() < 2 {
            return Err(ClassifierError::ModelError(
                format!("Model must have at least 2 classes, found {}", classes.len())
            ));
        }

        let rows = coef.len();
        let binary = rows == 1 && classes.len() == 2;
        if rows != classes.len() && !binary {
            return Err(ClassifierError::ModelError(
                format!("Model has {} coefficient rows for {} classes", rows, classes.len())
            ));
        }
        if let Some((i, row)) = coef.iter().enumerate().find(|(_, r)| r.len() != n_features) {
            return Err(ClassifierError::ModelError(
                format!("Coefficient row {} has {} values, expected {}", i, row.len(), n_features)
            ));
        }
        if intercept.len() != rows {
            return Err(ClassifierError::ModelError(
                format!("Model has {} intercepts for {} coefficient rows", intercept.len(), rows)
            ));
        }

        let flat: Vec<f32> = coef.into_iter().flatten().collect();
        let coef = Array2::from_shape_vec((rows, n_features), flat)
            .map_err(|e| ClassifierError::ModelError(format!("Failed to shape coefficients: {}", e)))?;

        Ok(Self {
            feature_names,
            classes,
            coef,
            intercept: Array1::from(intercept),
        })
    }

    fn decide(&self, scores: ndarray::ArrayView1<'_, f32>) -> Result<i64, ClassifierError> {
        if self.coef.nrows() == 1 {
            // binary: positive score selects the second class
            let idx = if scores[0] > 0.0 { 1 } else { 0 };
            return Ok(self.classes[idx]);
        }
        argmax(scores)
            .map(|i| self.classes[i])
            .ok_or_else(|| ClassifierError::PredictionError("Decision function produced no finite score".into()))
    }
}

impl DiseaseClassifier for LinearClassifier {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict_batch(&self, batch: ArrayView2<'_, f32>) -> Result<Vec<i64>, ClassifierError> {
        if batch.ncols() != self.feature_names.len() {
            return Err(ClassifierError::FeatureMismatch {
                expected: self.feature_names.len(),
                actual: batch.ncols(),
            });
        }

        let scores = batch.dot(&self.coef.t()) + &self.intercept;
        scores.axis_iter(Axis(0))
            .map(|row| self.decide(row))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn three_class_model() -> LinearClassifier {
        LinearClassifier::from_parts(LinearModelFile {
            feature_names: names(&["fever", "cough", "fatigue"]),
            classes: vec![0, 1, 2],
            coef: vec![
                vec![0.0, 0.0, 1.0],
                vec![-1.0, -1.0, 0.0],
                vec![1.0, 1.0, 0.0],
            ],
            intercept: vec![0.0, 0.0, 0.0],
        }).unwrap()
    }

    #[test]
    fn test_multiclass_argmax() {
        let model = three_class_model();
        let labels = model.predict_batch(array![[1.0, 1.0, 0.0], [0.0, 0.0, 1.0]].view()).unwrap();
        assert_eq!(labels, vec![2, 0]);
    }

    #[test]
    fn test_binary_uses_sign() {
        let model = LinearClassifier::from_parts(LinearModelFile {
            feature_names: names(&["itching", "rash"]),
            classes: vec![4, 9],
            coef: vec![vec![1.0, 1.0]],
            intercept: vec![-1.5],
        }).unwrap();
        assert_eq!(model.predict_batch(array![[1.0, 1.0]].view()).unwrap(), vec![9]);
        assert_eq!(model.predict_batch(array![[1.0, 0.0]].view()).unwrap(), vec![4]);
    }

    #[test]
    fn test_shape_validation() {
        let result = LinearClassifier::from_parts(LinearModelFile {
            feature_names: names(&["a", "b"]),
            classes: vec![0, 1, 2],
            coef: vec![vec![1.0, 0.0], vec![0.0]],
            intercept: vec![0.0, 0.0],
        });
        assert!(matches!(result, Err(ClassifierError::ModelError(_))));
    }

    #[test]
    fn test_wrong_width_is_feature_mismatch() {
        let model = three_class_model();
        let err = model.predict_batch(array![[1.0, 0.0]].view()).unwrap_err();
        assert!(matches!(err, ClassifierError::FeatureMismatch { expected: 3, actual: 2 }));
    }
}
