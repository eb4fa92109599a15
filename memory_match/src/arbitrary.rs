use quickcheck::{Arbitrary, Gen};

use crate::{BoardLayout, CardFeatures, SquareId};

/// Two cards whose features are shaped alike, so they can be compared.
#[derive(Clone, Debug)]
pub struct FeaturePair {
    pub a: CardFeatures,
    pub b: CardFeatures,
}

fn small_float(g: &mut Gen) -> f32 {
    f32::from(i8::arbitrary(g)) / 64.0
}

fn features(g: &mut Gen, signature_len: usize, descriptor_len: usize) -> CardFeatures {
    let signature = (0..signature_len).map(|_| small_float(g)).collect();
    let num_descriptors = usize::arbitrary(g) % 6;
    let descriptors = (0..num_descriptors)
        .map(|_| (0..descriptor_len).map(|_| small_float(g)).collect())
        .collect();
    CardFeatures::new(signature, descriptors)
}

impl Arbitrary for FeaturePair {
    fn arbitrary(g: &mut Gen) -> Self {
        let signature_len = usize::arbitrary(g) % 12 + 1;
        let descriptor_len = usize::arbitrary(g) % 8 + 1;
        Self {
            a: features(g, signature_len, descriptor_len),
            b: features(g, signature_len, descriptor_len),
        }
    }
}

/// A sequence of square picks on the standard board.
///
/// Each pick refers to one of a handful of card categories, so that some
/// picks pair up and others don't.
#[derive(Clone, Debug)]
pub struct PickSequence {
    pub picks: Vec<(SquareId, usize)>,
}

impl Arbitrary for PickSequence {
    fn arbitrary(g: &mut Gen) -> Self {
        let squares: Vec<SquareId> = BoardLayout::default().squares().collect();
        let len = usize::arbitrary(g) % 60;
        let picks = (0..len)
            .map(|_| {
                let square = *g.choose(&squares).unwrap();
                // Categories are a function of the square, like cards lying on a table
                let category = (usize::from(square.row) * 5 + usize::from(square.col)) % 10;
                (square, category)
            })
            .collect();
        Self { picks }
    }
}
