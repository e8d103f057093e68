// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Lazy k-subsets enumeration.
use std::{fmt, iter::FusedIterator, ops};

use crate::Card;

/// Largest subset size supported by the enumeration.
pub const MAX_K: usize = 7;

/// Creates table for nck(n, k) for n <= 52 and k <= 7.
const fn make_nck() -> [[u64; MAX_K + 1]; 53] {
    let mut t = [[0u64; MAX_K + 1]; 53];
    let mut n = 0;

    while n <= 52 {
        // base case nck(n, 0) = 1
        t[n][0] = 1;

        let mut k = 1;
        while k <= MAX_K && k <= n {
            // nck(n, k) = nck(n-1, k-1) + nck(n-1, k)
            t[n][k] = t[n - 1][k - 1] + t[n - 1][k];
            k += 1;
        }

        n += 1;
    }

    t
}

const NCKS: [[u64; MAX_K + 1]; 53] = make_nck();

/// Returns the binomial coefficient for n choose k.
///
/// Panics if n > 52 or k > 7.
#[inline]
pub fn nck(n: usize, k: usize) -> u64 {
    assert!(n <= 52, "n={n} must be 0 <= n <= 52");
    assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");
    NCKS[n][k]
}

/// Uses the combinatorial number system to convert n to a
/// k-combination (see Theorem L pg. 260 Knuth 4a).
fn nth_ksubset(mut n: u64, k: usize) -> [usize; MAX_K] {
    let mut out = [0; MAX_K];
    for k in (0..k).rev() {
        let mut c = k;
        while nck(c, k + 1) <= n {
            c += 1;
        }

        c = c.saturating_sub(1);
        out[k] = c;

        n = n.saturating_sub(nck(c, k + 1));
    }

    out
}

/// A fixed capacity set of up to seven cards.
///
/// This is the item yielded by [Combinations], it derefs to a slice of cards so
/// that it can be passed directly to the evaluator.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct CardSet {
    cards: [Card; MAX_K],
    len: usize,
}

impl CardSet {
    /// Creates a set from a slice.
    ///
    /// Panics if the slice has more than seven cards.
    pub fn from_slice(cards: &[Card]) -> Self {
        assert!(cards.len() <= MAX_K, "at most {MAX_K} cards");
        let mut set = Self::default();
        set.cards[..cards.len()].copy_from_slice(cards);
        set.len = cards.len();
        set
    }
}

impl ops::Deref for CardSet {
    type Target = [Card];

    fn deref(&self) -> &[Card] {
        &self.cards[..self.len]
    }
}

impl fmt::Debug for CardSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// An iterator over the k-subsets of a cards slice.
///
/// Subsets are generated in colexicographic order with Algorithm L from
/// TAOCP 4a, the iterator can start from any position in the sequence so that
/// the enumeration can be split between tasks.
#[derive(Clone)]
pub struct Combinations<'a> {
    cards: &'a [Card],
    // c[1..=k] are the current indices, c[k + 1] = n, c[k + 2] = 0.
    c: [usize; MAX_K + 3],
    k: usize,
    remaining: u64,
    started: bool,
}

impl<'a> Combinations<'a> {
    /// Creates an iterator that yields `count` k-subsets starting from the nth.
    ///
    /// Panics if k > 7.
    pub fn new(cards: &'a [Card], k: usize, nth: u64, count: u64) -> Self {
        assert!(k <= MAX_K, "k={k} must be 0 <= k <= {MAX_K}");

        let n = cards.len();
        let total = nck(n, k);
        let remaining = count.min(total.saturating_sub(nth));

        let mut c = [0usize; MAX_K + 3];
        let ks = nth_ksubset(nth.min(total.saturating_sub(1)), k);
        c[1..=k].copy_from_slice(&ks[..k]);
        c[k + 1] = n;

        Self {
            cards,
            c,
            k,
            remaining,
            started: false,
        }
    }

    /// Moves to the next subset, returns false if there are no more subsets.
    fn advance(&mut self) -> bool {
        let c = &mut self.c;
        let mut j = 1;
        while c[j] + 1 == c[j + 1] {
            c[j] = j - 1;
            j += 1;
        }

        if j > self.k {
            return false;
        }

        c[j] += 1;
        true
    }
}

impl Iterator for Combinations<'_> {
    type Item = CardSet;

    fn next(&mut self) -> Option<CardSet> {
        if self.remaining == 0 {
            return None;
        }

        if self.started && !self.advance() {
            self.remaining = 0;
            return None;
        }

        self.started = true;
        self.remaining -= 1;

        let mut set = CardSet {
            len: self.k,
            ..CardSet::default()
        };

        for (dst, &pos) in set.cards.iter_mut().zip(&self.c[1..=self.k]) {
            *dst = self.cards[pos];
        }

        Some(set)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Combinations<'_> {}

impl FusedIterator for Combinations<'_> {}
