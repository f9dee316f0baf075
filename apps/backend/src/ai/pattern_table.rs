//! Learned move-sequence statistics.
//!
//! A [`PatternKey`] is an ordered run of 1..=[`MAX_ORDER_CAP`] moves packed
//! into a base-3 code. Its order is part of the identity, so `[Rock]` and
//! `[Rock, Rock]` never collide even though both pack to code 0.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::domain::{Move, MOVE_COUNT};

/// Hard capacity of a pattern key. 3^8 fits in a `u16`.
pub const MAX_ORDER_CAP: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct PatternKey {
    order: u8,
    code: u16,
}

impl PatternKey {
    /// Pack `moves` oldest-first. `None` for an empty run or one longer than the cap.
    pub fn from_moves(moves: &[Move]) -> Option<Self> {
        if moves.is_empty() || moves.len() > MAX_ORDER_CAP {
            return None;
        }
        let code = moves
            .iter()
            .fold(0u16, |acc, mv| acc * MOVE_COUNT as u16 + mv.ordinal() as u16);
        Some(Self {
            order: moves.len() as u8,
            code,
        })
    }

    pub fn order(&self) -> usize {
        self.order as usize
    }

    /// Unpack the key back into its moves, oldest first.
    pub fn moves(&self) -> Vec<Move> {
        let mut code = self.code as usize;
        let mut moves = Vec::with_capacity(self.order());
        for _ in 0..self.order {
            let mv = match code % MOVE_COUNT {
                0 => Move::Rock,
                1 => Move::Paper,
                _ => Move::Scissors,
            };
            moves.push(mv);
            code /= MOVE_COUNT;
        }
        moves.reverse();
        moves
    }
}

impl PartialEq for PatternKey {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order && self.code == other.code
    }
}

impl Eq for PatternKey {}

impl Hash for PatternKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u32(((self.order as u32) << 16) | self.code as u32);
    }
}

/// How often each move followed a pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts([u32; MOVE_COUNT]);

impl OutcomeCounts {
    pub fn get(&self, mv: Move) -> u32 {
        self.0[mv.ordinal()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Most frequent move. Ties go to the lowest ordinal (Rock < Paper < Scissors).
    pub fn most_likely(&self) -> Move {
        let mut best = Move::Rock;
        for mv in Move::ALL {
            if self.get(mv) > self.get(best) {
                best = mv;
            }
        }
        best
    }

    fn record(&mut self, mv: Move) {
        let slot = &mut self.0[mv.ordinal()];
        *slot = slot.saturating_add(1);
    }
}

impl From<[u32; MOVE_COUNT]> for OutcomeCounts {
    fn from(counts: [u32; MOVE_COUNT]) -> Self {
        Self(counts)
    }
}

/// Map from pattern key to the moves observed right after it.
#[derive(Debug, Clone, Default)]
pub struct PatternTable {
    entries: HashMap<PatternKey, OutcomeCounts>,
}

impl PatternTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `outcome` following `key`.
    pub fn record(&mut self, key: PatternKey, outcome: Move) {
        self.entries.entry(key).or_default().record(outcome);
    }

    pub fn counts(&self, key: &PatternKey) -> Option<&OutcomeCounts> {
        self.entries.get(key)
    }

    /// Counts for the key built from `moves`, zero when unseen.
    pub fn counts_for(&self, moves: &[Move]) -> OutcomeCounts {
        PatternKey::from_moves(moves)
            .and_then(|key| self.entries.get(&key).copied())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
