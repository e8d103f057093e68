// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cards deck.
use ahash::AHashSet;
use rand::prelude::*;
use thiserror::Error;

use crate::{Card, Rank, Suit};

mod combinations;
pub use combinations::{CardSet, Combinations, MAX_K, nck};

/// Error returned for an impossible set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardsError {
    /// The same card appears more than once.
    #[error("invalid card set: {0} appears more than once")]
    DuplicateCard(Card),
}

/// A cards Deck
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Returns the 52 cards in suit major order.
    ///
    /// The iterator is lazy and can be cloned to restart the sequence.
    pub fn all_cards() -> impl Iterator<Item = Card> + Clone {
        Suit::suits().flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
    }

    /// Creates a deck with all the cards that are not in `known`.
    ///
    /// Fails if `known` contains the same card twice.
    pub fn remaining(known: &[Card]) -> Result<Self, CardsError> {
        let known = check_distinct(known)?;
        let cards = Self::all_cards().filter(|c| !known.contains(c)).collect();
        Ok(Self { cards })
    }

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.cards.shuffle(rng);
        deck
    }

    /// Deals a card from the deck, returns None if the deck is empty.
    pub fn deal(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// Checks if the deck contains a card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    /// Removes a card from the deck.
    pub fn remove(&mut self, card: Card) {
        self.cards.retain(|c| c != &card);
    }

    /// The cards in the deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns an iterator over all the k-cards subsets of this deck.
    ///
    /// Panics if k > 7.
    pub fn combinations(&self, k: usize) -> Combinations<'_> {
        Combinations::new(&self.cards, k, 0, u64::MAX)
    }

    /// Splits the k-cards subsets of this deck into `num_chunks` contiguous
    /// ranges that together visit every subset exactly once.
    ///
    /// Each chunk can be consumed from a different task, some chunks may be empty
    /// if there are fewer subsets than chunks.
    ///
    /// Panics if k > 7 or num_chunks is zero.
    pub fn combinations_chunks(&self, num_chunks: usize, k: usize) -> Vec<Combinations<'_>> {
        assert!(num_chunks > 0);

        let total = nck(self.cards.len(), k);
        let per_chunk = total.div_ceil(num_chunks as u64);

        (0..num_chunks as u64)
            .map(|chunk| Combinations::new(&self.cards, k, chunk * per_chunk, per_chunk))
            .collect()
    }

    /// Draws k distinct cards uniformly at random, the deck is not changed.
    ///
    /// Panics if k > 7.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R, k: usize) -> CardSet {
        assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");

        let mut set = [Card::default(); MAX_K];
        let mut len = 0;
        for c in self.cards.choose_multiple(rng, k) {
            set[len] = *c;
            len += 1;
        }

        CardSet::from_slice(&set[..len])
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self {
            cards: Self::all_cards().collect(),
        }
    }
}

impl IntoIterator for Deck {
    type Item = Card;
    type IntoIter = std::vec::IntoIter<Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.cards.into_iter()
    }
}

/// Checks that all cards are distinct, returns the cards as a set.
pub fn check_distinct(cards: &[Card]) -> Result<AHashSet<Card>, CardsError> {
    let mut set = AHashSet::with_capacity(cards.len());
    for &card in cards {
        if !set.insert(card) {
            return Err(CardsError::DuplicateCard(card));
        }
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ahash::HashSet;
    use rand::rngs::SmallRng;

    #[test]
    fn deck_order_is_stable() {
        let deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);
        assert_eq!(deck.cards()[0], Card::new(Rank::Deuce, Suit::Clubs));
        assert_eq!(deck.cards()[51], Card::new(Rank::Ace, Suit::Spades));

        // Restarting the iterator gives the same sequence.
        let all = Deck::all_cards();
        assert!(all.clone().eq(Deck::all_cards()));
        assert_eq!(all.count(), Deck::SIZE);
    }

    #[test]
    fn deal_all_cards() {
        let mut cards = HashSet::default();
        let mut deck = Deck::new_and_shuffled(&mut rand::rng());

        while let Some(card) = deck.deal() {
            cards.insert(card);
        }

        assert!(deck.is_empty());
        assert_eq!(cards.len(), Deck::SIZE);
        assert_eq!(deck.deal(), None);
    }

    #[test]
    fn remaining_cards() {
        let ad = Card::new(Rank::Ace, Suit::Diamonds);
        let kd = Card::new(Rank::King, Suit::Diamonds);

        let deck = Deck::remaining(&[ad, kd]).unwrap();
        assert_eq!(deck.count(), 50);
        assert!(!deck.contains(ad));
        assert!(!deck.contains(kd));

        let deck = Deck::remaining(&[]).unwrap();
        assert_eq!(deck.count(), Deck::SIZE);

        assert_eq!(
            Deck::remaining(&[ad, kd, ad]).unwrap_err(),
            CardsError::DuplicateCard(ad)
        );
    }

    #[test]
    fn deck_remove() {
        let mut deck = Deck::default();
        deck.remove(Card::new(Rank::Ace, Suit::Diamonds));
        deck.remove(Card::new(Rank::King, Suit::Diamonds));
        assert_eq!(deck.count(), 50);
        assert_eq!(deck.combinations(2).count(), 1_225);
    }

    #[test]
    fn chunks_cover_all_subsets() {
        let deck = Deck::remaining(&Deck::all_cards().take(30).collect::<Vec<_>>()).unwrap();
        let all = deck.combinations(4).collect::<Vec<_>>();

        for num_chunks in [1, 3, 7, 64] {
            let chunks = deck.combinations_chunks(num_chunks, 4);
            assert_eq!(chunks.len(), num_chunks);

            let joined = chunks.into_iter().flatten().collect::<Vec<_>>();
            assert_eq!(joined, all);
        }

        // More chunks than subsets.
        let small = Deck::remaining(&Deck::all_cards().skip(3).collect::<Vec<_>>()).unwrap();
        let chunks = small.combinations_chunks(8, 2);
        assert_eq!(chunks.into_iter().map(|c| c.count()).sum::<usize>(), 3);
    }

    #[test]
    fn draw_distinct_cards() {
        let deck = Deck::remaining(&[Card::new(Rank::Ace, Suit::Spades)]).unwrap();
        let mut rng = SmallRng::seed_from_u64(101);

        for _ in 0..1_000 {
            let set = deck.draw(&mut rng, 5);
            assert_eq!(set.len(), 5);
            assert!(check_distinct(&set).is_ok());
            assert!(set.iter().all(|c| deck.contains(*c)));
        }

        assert!(deck.draw(&mut rng, 0).is_empty());
    }
}
