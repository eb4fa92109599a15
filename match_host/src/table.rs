use std::collections::BTreeMap;

use memory_match::{BoardLayout, CardCategory, CardFeatures, SquareId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

const SIGNATURE_LEN: usize = 32;
const DESCRIPTOR_LEN: usize = 32;
const DESCRIPTORS_PER_CARD: usize = 12;
/// Per-value jitter of one scan.
const NOISE: f32 = 0.01;

const PICTURE_NAMES: [&str; 12] = [
    "dog", "cat", "car", "tree", "house", "sun", "fish", "bird", "apple", "ball", "boat", "star",
];

/// What the camera sees for one picture, before noise.
#[derive(Clone, Debug)]
struct Picture {
    name: String,
    signature: Vec<f32>,
    descriptors: Vec<Vec<f32>>,
}

/// Cards lying face down on a table, scanned by a camera that sometimes fails.
pub struct SimulatedTable {
    layout: BoardLayout,
    pictures: Vec<Picture>,
    cards: BTreeMap<SquareId, usize>,
    failure_rate: f64,
    rng: StdRng,
}

impl SimulatedTable {
    /// Creates one picture per pair of squares and deals the cards.
    pub fn new(layout: BoardLayout, failure_rate: f64, mut rng: StdRng) -> Self {
        let pictures = (0..layout.len() / 2)
            .map(|idx| Picture {
                name: PICTURE_NAMES
                    .get(idx)
                    .map(|name| String::from(*name))
                    .unwrap_or_else(|| format!("picture {}", idx + 1)),
                signature: (0..SIGNATURE_LEN).map(|_| rng.gen()).collect(),
                descriptors: (0..DESCRIPTORS_PER_CARD)
                    .map(|_| (0..DESCRIPTOR_LEN).map(|_| rng.gen()).collect())
                    .collect(),
            })
            .collect();
        let mut table = Self {
            layout,
            pictures,
            cards: BTreeMap::new(),
            failure_rate: failure_rate.clamp(0.0, 1.0),
            rng,
        };
        table.shuffle();
        table
    }

    /// Collects the cards and deals them again in a new order.
    pub fn shuffle(&mut self) {
        let mut deck: Vec<usize> = (0..self.pictures.len()).flat_map(|idx| [idx, idx]).collect();
        deck.shuffle(&mut self.rng);
        self.cards = self.layout.squares().zip(deck).collect();
        debug!(cards = self.cards.len(), "Dealt cards");
    }

    /// Looks at one card. `None` means the scan failed.
    pub fn scan(&mut self, square: SquareId) -> Option<CardFeatures> {
        let picture = &self.pictures[*self.cards.get(&square)?];
        if self.rng.gen_bool(self.failure_rate) {
            trace!(%square, "Camera could not read the card");
            return None;
        }
        let rng = &mut self.rng;
        let mut jitter = |values: &[f32]| -> Vec<f32> {
            values
                .iter()
                .map(|v| v + rng.gen_range(-NOISE..=NOISE))
                .collect()
        };
        let signature = jitter(&picture.signature);
        let descriptors = picture.descriptors.iter().map(|d| jitter(d)).collect();
        Some(CardFeatures::new(signature, descriptors))
    }

    /// Where the picture of a card can be shown from.
    pub fn asset(&self, square: SquareId) -> String {
        format!("scanned_cards/{}.jpg", square)
    }

    /// The index of the picture on a square.
    pub fn picture_at(&self, square: SquareId) -> Option<usize> {
        self.cards.get(&square).copied()
    }

    /// Reference signatures of all pictures, for naming scanned cards.
    pub fn catalog(&self) -> Vec<CardCategory> {
        self.pictures
            .iter()
            .map(|picture| CardCategory {
                name: picture.name.clone(),
                signature: picture.signature.clone(),
                sentence: Some(format!("Look, I found the {}!", picture.name)),
                audio: None,
            })
            .collect()
    }
}
