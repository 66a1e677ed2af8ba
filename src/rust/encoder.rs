use std::collections::HashMap;
use ndarray::Array1;
use log::debug;

use crate::classifier::ClassifierError;

/// The ordered symptom names that define vector layout.
///
/// The order is the classifier's fit order and never changes after load. A
/// name→position index is built once so encoding does not scan the list.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    names: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FeatureSchema {
    /// Builds a schema from the classifier's feature names.
    ///
    /// # Errors
    /// `ValidationError` if the list is empty or names a feature twice.
    pub fn new(names: Vec<String>) -> Result<Self, ClassifierError> {
        if names.is_empty() {
            return Err(ClassifierError::ValidationError("Feature schema cannot be empty".into()));
        }

        let mut positions = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if positions.insert(name.clone(), i).is_some() {
                return Err(ClassifierError::ValidationError(
                    format!("Feature '{}' appears more than once in the schema", name)
                ));
            }
        }

        Ok(Self { names, positions })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn position(&self, symptom: &str) -> Option<usize> {
        self.positions.get(symptom).copied()
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.positions.contains_key(symptom)
    }
}

/// Presence/absence of every schema symptom, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymptomVector {
    values: Vec<u8>,
}

impl SymptomVector {
    pub fn zeros(len: usize) -> Self {
        Self { values: vec![0; len] }
    }

    /// Wraps raw 0/1 values. Any non-zero value counts as present.
    pub fn from_values(values: Vec<u8>) -> Self {
        Self { values: values.into_iter().map(|v| u8::from(v != 0)).collect() }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of symptoms marked present
    pub fn count_present(&self) -> usize {
        self.values.iter().filter(|&&v| v == 1).count()
    }

    pub fn is_zero(&self) -> bool {
        self.count_present() == 0
    }

    /// Schema positions marked present, ascending
    pub fn present_indices(&self) -> Vec<usize> {
        self.values.iter()
            .enumerate()
            .filter(|(_, &v)| v == 1)
            .map(|(i, _)| i)
            .collect()
    }

    /// Numeric row in the form classifiers consume
    pub fn to_array(&self) -> Array1<f32> {
        self.values.iter().map(|&v| f32::from(v)).collect()
    }

    fn set(&mut self, index: usize) {
        self.values[index] = 1;
    }
}

/// Turns symptom names into a [`SymptomVector`] laid out by a [`FeatureSchema`].
#[derive(Debug, Clone, Copy)]
pub struct FeatureEncoder<'a> {
    schema: &'a FeatureSchema,
}

impl<'a> FeatureEncoder<'a> {
    pub fn new(schema: &'a FeatureSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'a FeatureSchema {
        self.schema
    }

    /// Encodes the given symptoms. Names outside the schema are skipped, and
    /// repeated names are harmless. Empty input gives the all-zero vector.
    pub fn encode<I, S>(&self, symptoms: I) -> SymptomVector
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vector = SymptomVector::zeros(self.schema.len());
        for symptom in symptoms {
            let symptom = symptom.as_ref();
            match self.schema.position(symptom) {
                Some(index) => vector.set(index),
                None => debug!("Ignoring unknown symptom '{}'", symptom),
            }
        }
        vector
    }

    /// Schema names for the positions set in `vector`, in schema order
    pub fn decode(&self, vector: &SymptomVector) -> Vec<&'a str> {
        vector.present_indices()
            .into_iter()
            .filter_map(|i| self.schema.names().get(i))
            .map(String::as_str)
            .collect()
    }
}
