use serde::{Deserialize, Serialize};

use crate::InvalidInput;

/// What the vision service extracted from one card image.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardFeatures {
    /// Fixed-length summary vector (e.g. the mean of all local descriptors).
    pub signature: Vec<f32>,
    /// Local feature descriptors, in no particular order. May be empty.
    #[serde(default)]
    pub descriptors: Vec<Vec<f32>>,
}

impl CardFeatures {
    pub fn new(signature: Vec<f32>, descriptors: Vec<Vec<f32>>) -> Self {
        Self {
            signature,
            descriptors,
        }
    }

    /// Checks the data on its own, without another card to compare against.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if self.signature.is_empty() {
            return Err(InvalidInput::EmptySignature);
        }
        if !self.signature.iter().all(|x| x.is_finite()) {
            return Err(InvalidInput::NonFiniteValue);
        }
        if let Some(first) = self.descriptors.first() {
            for desc in &self.descriptors {
                if desc.len() != first.len() {
                    return Err(InvalidInput::DescriptorLength {
                        expected: first.len(),
                        actual: desc.len(),
                    });
                }
                if !desc.iter().all(|x| x.is_finite()) {
                    return Err(InvalidInput::NonFiniteValue);
                }
            }
        }
        Ok(())
    }

    /// The length of each descriptor, if there are any.
    pub fn descriptor_len(&self) -> Option<usize> {
        self.descriptors.first().map(Vec::len)
    }

    pub fn has_descriptors(&self) -> bool {
        !self.descriptors.is_empty()
    }
}

pub(crate) fn squared_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| {
            let d = f64::from(x) - f64::from(y);
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation() {
        assert_eq!(
            CardFeatures::new(vec![], vec![]).validate(),
            Err(InvalidInput::EmptySignature)
        );
        assert_eq!(
            CardFeatures::new(vec![1.0, f32::NAN], vec![]).validate(),
            Err(InvalidInput::NonFiniteValue)
        );
        assert_eq!(
            CardFeatures::new(vec![1.0], vec![vec![1.0, 2.0], vec![1.0]]).validate(),
            Err(InvalidInput::DescriptorLength {
                expected: 2,
                actual: 1
            })
        );
        assert!(CardFeatures::new(vec![1.0], vec![]).validate().is_ok());
        assert!(CardFeatures::new(vec![1.0], vec![vec![0.5; 4]; 3])
            .validate()
            .is_ok());
    }

    #[test]
    fn descriptors_default_to_empty() {
        let features: CardFeatures = serde_json::from_str(r#"{"signature": [0.5, 1.0]}"#).unwrap();
        assert!(!features.has_descriptors());
        assert_eq!(features.descriptor_len(), None);
    }
}
