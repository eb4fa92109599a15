use serde::{Deserialize, Serialize};

use crate::features::squared_distance;

/// A known picture, with what to say when the robot finds it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardCategory {
    pub name: String,
    /// Reference signature for this picture.
    pub signature: Vec<f32>,
    #[serde(default)]
    pub sentence: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

/// Names revealed cards by comparing their signature with known pictures.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardCatalog {
    categories: Vec<CardCategory>,
    max_distance: f32,
}

impl CardCatalog {
    pub fn new(categories: Vec<CardCategory>, max_distance: f32) -> Self {
        Self {
            categories,
            max_distance,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn categories(&self) -> &[CardCategory] {
        &self.categories
    }

    /// The closest category within the identification distance.
    ///
    /// Categories whose reference signature has a different length are skipped.
    pub fn identify(&self, signature: &[f32]) -> Option<&CardCategory> {
        self.categories
            .iter()
            .filter(|cat| cat.signature.len() == signature.len())
            .map(|cat| (cat, squared_distance(&cat.signature, signature).sqrt()))
            .filter(|&(_, dist)| dist <= f64::from(self.max_distance))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(cat, _)| cat)
    }
}
