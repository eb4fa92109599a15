use serde::{Deserialize, Serialize};

use crate::{BoardLayout, CardCatalog, CardCategory, Comparator, Difficulty, InvalidConfig, MatchThresholds};

/// Everything that can be tuned about one game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Maximum PCA distance for two cards to match.
    pub match_distance_threshold: f32,
    /// Minimum descriptor overlap score for two cards to match.
    pub match_knn_score_threshold: f32,
    pub knn_ratio: f32,
    pub pca_dims: usize,
    #[serde(deserialize_with = "Difficulty::deserialize_lenient")]
    pub difficulty_default: Difficulty,
    pub rows: u8,
    pub columns: u8,
    /// Known pictures, for announcing what the robot found.
    pub catalog: Vec<CardCategory>,
    pub identification_distance_threshold: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        let thresholds = MatchThresholds::default();
        let layout = BoardLayout::default();
        Self {
            match_distance_threshold: thresholds.distance,
            match_knn_score_threshold: thresholds.knn_score,
            knn_ratio: thresholds.knn_ratio,
            pca_dims: thresholds.pca_dims,
            difficulty_default: Difficulty::default(),
            rows: layout.rows,
            columns: layout.columns,
            catalog: Vec::new(),
            identification_distance_threshold: 0.08,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        self.layout().validate()?;
        for (name, value) in [
            ("match_distance_threshold", self.match_distance_threshold),
            ("match_knn_score_threshold", self.match_knn_score_threshold),
            ("knn_ratio", self.knn_ratio),
            (
                "identification_distance_threshold",
                self.identification_distance_threshold,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidConfig::Threshold { name, value });
            }
        }
        if self.pca_dims == 0 {
            return Err(InvalidConfig::ZeroPcaDims);
        }
        Ok(())
    }

    pub fn layout(&self) -> BoardLayout {
        BoardLayout {
            rows: self.rows,
            columns: self.columns,
        }
    }

    pub fn thresholds(&self) -> MatchThresholds {
        MatchThresholds {
            distance: self.match_distance_threshold,
            knn_score: self.match_knn_score_threshold,
            knn_ratio: self.knn_ratio,
            pca_dims: self.pca_dims,
        }
    }

    pub fn comparator(&self) -> Comparator {
        Comparator::new(self.thresholds())
    }

    pub fn card_catalog(&self) -> CardCatalog {
        CardCatalog::new(self.catalog.clone(), self.identification_distance_threshold)
    }
}
