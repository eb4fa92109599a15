use serde::{Deserialize, Serialize};

use crate::features::squared_distance;
use crate::pca::{self, euclidean};
use crate::{CardFeatures, InvalidInput};

/// The numbers that decide whether two cards show the same picture.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchThresholds {
    /// Maximum distance between the PCA-reduced signatures to count as a match.
    pub distance: f32,
    /// Minimum descriptor overlap score to count as a match.
    pub knn_score: f32,
    /// Lowe's ratio: a descriptor correspondence is good if the nearest
    /// neighbor is closer than this fraction of the second-nearest.
    pub knn_ratio: f32,
    /// Requested number of principal components.
    pub pca_dims: usize,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            distance: 0.4,
            knn_score: 0.3,
            knn_ratio: 0.75,
            pca_dims: 3,
        }
    }
}

/// The verdict for one pair of cards, with both signals that led to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Comparison {
    pub is_match: bool,
    pub reduced_distance: f32,
    pub overlap_score: f32,
}

impl Comparison {
    /// Which signal confirmed the match, for logging.
    pub fn reason(&self, thresholds: &MatchThresholds) -> &'static str {
        if self.overlap_score >= thresholds.knn_score {
            "overlap"
        } else if self.reduced_distance <= thresholds.distance {
            "distance"
        } else {
            "none"
        }
    }
}

/// Stateless two-signal card comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Comparator {
    pub thresholds: MatchThresholds,
}

impl Comparator {
    pub fn new(thresholds: MatchThresholds) -> Self {
        Self { thresholds }
    }

    /// Compares two cards.
    ///
    /// Either signal alone is enough for a match: a small distance between the
    /// reduced signatures, or a high descriptor overlap. The result does not
    /// depend on the argument order.
    pub fn compare(&self, a: &CardFeatures, b: &CardFeatures) -> Result<Comparison, InvalidInput> {
        a.validate()?;
        b.validate()?;
        if a.signature.len() != b.signature.len() {
            return Err(InvalidInput::SignatureLength {
                expected: a.signature.len(),
                actual: b.signature.len(),
            });
        }
        if let (Some(len_a), Some(len_b)) = (a.descriptor_len(), b.descriptor_len()) {
            if len_a != len_b {
                return Err(InvalidInput::DescriptorLength {
                    expected: len_a,
                    actual: len_b,
                });
            }
        }

        let reduced_distance = self.reduced_distance(&a.signature, &b.signature);
        let overlap_score = overlap_score(&a.descriptors, &b.descriptors, self.thresholds.knn_ratio);
        let is_match = overlap_score >= self.thresholds.knn_score
            || reduced_distance <= self.thresholds.distance;
        Ok(Comparison {
            is_match,
            reduced_distance,
            overlap_score,
        })
    }

    /// Shorthand for callers that only need the verdict.
    pub fn is_match(&self, a: &CardFeatures, b: &CardFeatures) -> Result<bool, InvalidInput> {
        self.compare(a, b).map(|cmp| cmp.is_match)
    }

    fn reduced_distance(&self, a: &[f32], b: &[f32]) -> f32 {
        let projected = pca::project(&[a, b], self.thresholds.pca_dims.max(1));
        euclidean(&projected[0], &projected[1]) as f32
    }
}

/// Fraction of descriptors in `a` that have a distinctive nearest neighbor in `b`.
///
/// A descriptor counts when its nearest neighbor in `b` is closer than
/// `ratio` times the second-nearest one. Descriptors of `a` are skipped when
/// `b` has fewer than two entries. The count is divided by the size of the
/// smaller set. Zero if either set is empty.
pub fn directional_overlap(a: &[Vec<f32>], b: &[Vec<f32>], ratio: f32) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let ratio = f64::from(ratio);
    let mut good = 0usize;
    for desc in a {
        let mut nearest = f64::INFINITY;
        let mut second = f64::INFINITY;
        for other in b {
            let d = squared_distance(desc, other).sqrt();
            if d < nearest {
                second = nearest;
                nearest = d;
            } else if d < second {
                second = d;
            }
        }
        if second.is_finite() && nearest < ratio * second {
            good += 1;
        }
    }
    good as f32 / a.len().min(b.len()) as f32
}

/// The larger of the two directional overlaps, so that comparing `a` with `b`
/// gives the same score as comparing `b` with `a`.
pub fn overlap_score(a: &[Vec<f32>], b: &[Vec<f32>], ratio: f32) -> f32 {
    directional_overlap(a, b, ratio).max(directional_overlap(b, a, ratio))
}
