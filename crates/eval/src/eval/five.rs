// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Five cards hand classification.
use super::{HandRank, HandValue};
use crate::Card;

/// Rank mask of the A-2-3-4-5 straight.
const WHEEL: u16 = 0x100F;

/// Evaluates exactly five cards.
pub(super) fn eval(hand: &[Card; 5]) -> HandValue {
    let mut counts = [0u8; 13];
    let mut ranks = 0u16;
    let mut suits = 0xF;

    for c in hand {
        counts[c.rank_bits() as usize] += 1;
        ranks |= c.rank_mask();
        suits &= c.suit_bits();
    }

    let is_flush = suits != 0;

    // Five distinct ranks: straights, flushes and high card.
    if ranks.count_ones() == 5 {
        let mut kickers = [0u8; 5];
        for (dst, rank) in kickers.iter_mut().zip(ranks_desc(ranks)) {
            *dst = rank;
        }

        return match (straight_top(ranks), is_flush) {
            (Some(top), true) => HandValue::new(HandRank::StraightFlush, &[top]),
            (Some(top), false) => HandValue::new(HandRank::Straight, &[top]),
            (None, true) => HandValue::new(HandRank::Flush, &kickers),
            (None, false) => HandValue::new(HandRank::HighCard, &kickers),
        };
    }

    // Group ranks by count, highest count first and then highest rank, a rank
    // that comes first in the array wins ties on equal counts.
    let mut groups = [(0u8, 0u8); 5];
    let mut len = 0;
    for rank in (0..13u8).rev() {
        let count = counts[rank as usize];
        if count > 0 {
            groups[len] = (count, rank);
            len += 1;
        }
    }

    let groups = &mut groups[..len];
    groups.sort_by(|a, b| b.0.cmp(&a.0));

    let mut tiebreakers = [0u8; 5];
    for (dst, &(_, rank)) in tiebreakers.iter_mut().zip(groups.iter()) {
        *dst = rank;
    }

    let tiebreakers = &tiebreakers[..len];
    let rank = match (groups[0].0, groups[1].0) {
        (4, _) => HandRank::FourOfAKind,
        (3, 2) => HandRank::FullHouse,
        (3, _) => HandRank::ThreeOfAKind,
        (2, 2) => HandRank::TwoPair,
        _ => HandRank::OnePair,
    };

    HandValue::new(rank, tiebreakers)
}

/// Returns the rank index of the highest card in a straight.
fn straight_top(ranks: u16) -> Option<u8> {
    if ranks == WHEEL {
        // Five high.
        return Some(3);
    }

    // Five consecutive bits, the top bit is the lowest set bit plus four.
    let low = ranks.trailing_zeros();
    (ranks >> low == 0x1F).then_some(low as u8 + 4)
}

/// Iterates the rank indices in a rank mask from the highest.
fn ranks_desc(ranks: u16) -> impl Iterator<Item = u8> {
    (0..13u8).rev().filter(move |r| ranks & (1 << r) != 0)
}
