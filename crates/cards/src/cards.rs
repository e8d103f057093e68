// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Primes used to encode a card rank.
const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// A Poker card.
///
/// A card is represented using the encoding in the [Cactus Kev's][kevlink] Poker
/// hand evaluator with each card having the following format:
///
/// ```text
///   +--------+--------+--------+--------+
///   |xxxbbbbb|bbbbbbbb|cdhsrrrr|xxpppppp|
///   +--------+--------+--------+--------+
///   p = prime number of rank (deuce=2,trey=3,four=5,five=7,...,ace=41)
///   r = rank of card (deuce=0,trey=1,four=2,five=3,...,ace=12)
///   cdhs = suit of card
///   b = bit turned on depending on rank of card
/// ```
///
/// The evaluator only needs the rank bit and the suit bits, the prime is kept so
/// that the card id is the same as the one on Kev's site.
///
/// [kevlink]: http://suffe.cool/poker/evaluator.html
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card(u32);

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        let (rank, suit) = (rank as u32, suit as u32);
        Self(PRIMES[rank as usize] | (rank << 8) | (suit << 12) | (1 << (rank + 16)))
    }

    /// This card unique id.
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.suit_bits() {
            0x8 => Suit::Clubs,
            0x4 => Suit::Diamonds,
            0x2 => Suit::Hearts,
            0x1 => Suit::Spades,
            _ => unreachable!("Invalid suit value 0x{:x}", self.0),
        }
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        match Rank::from_index(self.rank_bits()) {
            Some(rank) => rank,
            None => unreachable!("Invalid rank 0x{:x}", self.0),
        }
    }

    /// Returns the rank bits, deuce=0 .. ace=12.
    #[inline]
    pub fn rank_bits(&self) -> u8 {
        ((self.0 >> 8) & 0xf) as u8
    }

    /// Returns the suit bits.
    #[inline]
    pub fn suit_bits(&self) -> u8 {
        ((self.0 >> 12) & 0xf) as u8
    }

    /// Returns the single bit rank mask, deuce=0x1 .. ace=0x1000.
    #[inline]
    pub fn rank_mask(&self) -> u16 {
        (self.0 >> 16) as u16
    }
}

impl Default for Card {
    fn default() -> Self {
        Card::new(Rank::Deuce, Suit::Clubs)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank(), self.suit())
    }
}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses a card like `Ah`, `TD`, `10c` or `Q♠`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let suit_char = chars.next_back().ok_or(ParseCardError::Empty)?;
        let rank_str = chars.as_str();

        let rank = match rank_str {
            "10" => Rank::Ten,
            r => {
                let mut rc = r.chars();
                match (rc.next(), rc.next()) {
                    (Some(c), None) => Rank::from_char(c)
                        .ok_or_else(|| ParseCardError::InvalidRank(r.to_string()))?,
                    _ => return Err(ParseCardError::InvalidRank(r.to_string())),
                }
            }
        };

        let suit = Suit::from_char(suit_char).ok_or(ParseCardError::InvalidSuit(suit_char))?;
        Ok(Card::new(rank, suit))
    }
}

/// Parses a list of cards.
///
/// Cards can be separated by whitespace or commas or written back to back:
///
/// ```
/// # use showdown_cards::{parse_cards, Card, Rank, Suit};
/// let cards = parse_cards("AhKh 10c,2♠").unwrap();
/// assert_eq!(cards.len(), 4);
/// assert_eq!(cards[2], Card::new(Rank::Ten, Suit::Clubs));
/// ```
pub fn parse_cards(s: &str) -> Result<Vec<Card>, ParseCardError> {
    let mut cards = Vec::new();

    for token in s.split(|c: char| c.is_whitespace() || c == ',') {
        let mut rest = token;
        while !rest.is_empty() {
            // A card is a rank (one char, or "10") followed by a suit char.
            let rank_len = if rest.starts_with("10") {
                2
            } else {
                rest.chars().next().map_or(0, char::len_utf8)
            };

            let suit_len = rest[rank_len..]
                .chars()
                .next()
                .map(char::len_utf8)
                .ok_or_else(|| ParseCardError::Truncated(rest.to_string()))?;

            let (card, tail) = rest.split_at(rank_len + suit_len);
            cards.push(card.parse()?);
            rest = tail;
        }
    }

    Ok(cards)
}

/// Error returned when parsing a card.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCardError {
    /// The input is empty.
    #[error("empty card string")]
    Empty,
    /// The rank is not one of 2-9, T, J, Q, K, A.
    #[error("invalid card rank '{0}'")]
    InvalidRank(String),
    /// The suit is not one of c, d, h, s.
    #[error("invalid card suit '{0}'")]
    InvalidSuit(char),
    /// The input ends in the middle of a card.
    #[error("incomplete card '{0}'")]
    Truncated(String),
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    const ALL: [Rank; 13] = {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> + Clone {
        Self::ALL.into_iter()
    }

    /// Returns the rank for an index deuce=0 .. ace=12.
    pub fn from_index(idx: u8) -> Option<Rank> {
        Self::ALL.get(idx as usize).copied()
    }

    /// The rank ordinal value, deuce=2 .. ace=14.
    pub fn value(&self) -> u8 {
        *self as u8 + 2
    }

    fn from_char(c: char) -> Option<Rank> {
        let rank = match c.to_ascii_uppercase() {
            '2' => Rank::Deuce,
            '3' => Rank::Trey,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return None,
        };

        Some(rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self {
            Rank::Deuce => '2',
            Rank::Trey => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };

        write!(f, "{rank}")
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 8,
    /// Diamonds suit.
    Diamonds = 4,
    /// Hearts suit.
    Hearts = 2,
    /// Spades suit.
    Spades = 1,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

impl Suit {
    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> + Clone {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    fn from_char(c: char) -> Option<Suit> {
        let suit = match c {
            'c' | 'C' | '♣' | '♧' => Suit::Clubs,
            'd' | 'D' | '♦' | '♢' => Suit::Diamonds,
            'h' | 'H' | '♥' | '♡' => Suit::Hearts,
            's' | 'S' | '♠' | '♤' => Suit::Spades,
            _ => return None,
        };

        Some(suit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Deck;
    use ahash::HashSet;

    #[test]
    fn card_encoding() {
        let mut ids = HashSet::default();

        for card in Deck::all_cards() {
            assert_eq!(card.id() & 0xFF, PRIMES[card.rank() as usize]);
            assert_eq!((card.id() >> 8) & 0xF, card.rank() as u32);
            assert_eq!((card.id() >> 12) & 0xF, card.suit() as u32);
            assert_eq!(card.rank_mask(), 1 << (card.rank() as usize));
            ids.insert(card.id());
        }

        assert_eq!(ids.len(), Deck::SIZE);

        // From the Cactus Kev's website.
        assert_eq!(Card::new(Rank::King, Suit::Diamonds).id(), 0x08004b25);
        assert_eq!(Card::new(Rank::Five, Suit::Spades).id(), 0x00081307);
        assert_eq!(Card::new(Rank::Jack, Suit::Clubs).id(), 0x0200891d);
    }

    #[test]
    fn card_to_string() {
        assert_eq!(Card::new(Rank::King, Suit::Diamonds).to_string(), "KD");
        assert_eq!(Card::new(Rank::Five, Suit::Spades).to_string(), "5S");
        assert_eq!(Card::new(Rank::Ten, Suit::Hearts).to_string(), "TH");
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).to_string(), "AH");
    }

    #[test]
    fn card_from_str() {
        for card in Deck::all_cards() {
            assert_eq!(card.to_string().parse::<Card>(), Ok(card));
            assert_eq!(card.to_string().to_lowercase().parse::<Card>(), Ok(card));
        }

        assert_eq!("10h".parse(), Ok(Card::new(Rank::Ten, Suit::Hearts)));
        assert_eq!("A♥".parse(), Ok(Card::new(Rank::Ace, Suit::Hearts)));
        assert_eq!("q♣".parse(), Ok(Card::new(Rank::Queen, Suit::Clubs)));

        assert_eq!("".parse::<Card>(), Err(ParseCardError::Empty));
        assert_eq!(
            "1h".parse::<Card>(),
            Err(ParseCardError::InvalidRank("1".to_string()))
        );
        assert_eq!("Ax".parse::<Card>(), Err(ParseCardError::InvalidSuit('x')));
        assert!("AKh".parse::<Card>().is_err());
    }

    #[test]
    fn parse_card_lists() {
        let cards = parse_cards("AhKh").unwrap();
        assert_eq!(
            cards,
            vec![
                Card::new(Rank::Ace, Suit::Hearts),
                Card::new(Rank::King, Suit::Hearts)
            ]
        );

        let cards = parse_cards(" 2♥ 7d, 9C  J♠ 10h ").unwrap();
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[4], Card::new(Rank::Ten, Suit::Hearts));

        assert!(parse_cards("").unwrap().is_empty());
        assert!(parse_cards("AhK").is_err());
    }

    #[test]
    fn rank_values() {
        assert_eq!(Rank::Deuce.value(), 2);
        assert_eq!(Rank::Ten.value(), 10);
        assert_eq!(Rank::Ace.value(), 14);
        assert_eq!(Rank::ranks().count(), 13);
        assert_eq!(Rank::from_index(12), Some(Rank::Ace));
        assert_eq!(Rank::from_index(13), None);
    }
}
