use rand::Rng;

use crate::bank::QuestionAnswer;
use crate::card::Card;

/// In-place Fisher-Yates: walk from the last index down to 1, swapping each
/// slot with a uniformly chosen index in `[0, i]`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Shuffle a copy of `bank` and deal `count` cards with ids `1..=count`.
///
/// When `count` exceeds the bank size the shuffled order repeats. An empty
/// bank yields an empty deck.
pub fn deal<R: Rng + ?Sized>(bank: &[QuestionAnswer], count: usize, rng: &mut R) -> Vec<Card> {
    if bank.is_empty() {
        return Vec::new();
    }

    let mut shuffled = bank.to_vec();
    shuffle(&mut shuffled, rng);

    (0..count)
        .map(|i| Card::new(i + 1, shuffled[i % shuffled.len()].clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{rngs::StdRng, SeedableRng};

    fn bank(n: usize) -> Vec<QuestionAnswer> {
        (0..n)
            .map(|i| QuestionAnswer::new(format!("q{i}"), format!("a{i}")))
            .collect()
    }

    #[test]
    fn test_shuffle_keeps_every_item() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut items: Vec<u32> = (0..20).collect();
        shuffle(&mut items, &mut rng);

        let sorted: Vec<u32> = items.iter().copied().sorted().collect();
        assert_eq!(sorted, (0..20).collect::<Vec<u32>>());
    }

    #[test]
    fn test_shuffle_handles_tiny_slices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = vec![];
        shuffle(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![42];
        shuffle(&mut one, &mut rng);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn test_shuffle_moves_things_around() {
        // 20! orderings; at least one of a handful of seeds must differ from identity
        let identity: Vec<u32> = (0..20).collect();
        let moved = (0..5u64).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut items = identity.clone();
            shuffle(&mut items, &mut rng);
            items != identity
        });
        assert!(moved);
    }

    #[test]
    fn test_deal_ids_are_sequential() {
        let mut rng = StdRng::seed_from_u64(3);
        let cards = deal(&bank(12), 9, &mut rng);

        assert_eq!(cards.len(), 9);
        let ids: Vec<usize> = cards.iter().map(|c| c.id()).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<usize>>());
    }

    #[test]
    fn test_deal_without_repeats_when_bank_is_large_enough() {
        let mut rng = StdRng::seed_from_u64(11);
        let source = bank(12);
        let cards = deal(&source, 12, &mut rng);

        assert!(cards.iter().map(|c| c.question()).all_unique());
        assert!(cards.iter().all(|c| source.contains(c.qa())));
    }

    #[test]
    fn test_deal_repeats_by_modulo() {
        let mut rng = StdRng::seed_from_u64(5);
        let cards = deal(&bank(4), 10, &mut rng);

        assert_eq!(cards.len(), 10);
        for i in 4..10 {
            assert_eq!(cards[i].qa(), cards[i % 4].qa());
        }
    }

    #[test]
    fn test_deal_from_empty_bank() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(deal(&[], 9, &mut rng).is_empty());
    }
}
