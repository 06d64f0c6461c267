//! Transposition table for caching search results within one search call.

use rustc_hash::FxHashMap;

use crate::board::Board;
use crate::dama_move::DamaMove;

#[derive(Clone, Debug)]
pub struct TTEntry {
    pub score: f64,
    pub bound_type: BoundType,
    pub best_move: Option<DamaMove>,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum BoundType {
    Exact,
    Lower,
    Upper,
}

/// Entries are keyed by the full position (including the side to move) and
/// the remaining search depth, so a score is only ever reused at the exact
/// depth it was computed for.
#[derive(Default)]
pub struct TranspositionTable {
    table: FxHashMap<(Board, u8), TTEntry>,
    hits: usize,
    bound_rejected: usize,
    overwrites: usize,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(
        &mut self,
        board: Board,
        depth: u8,
        score: f64,
        bound_type: BoundType,
        best_move: Option<DamaMove>,
    ) {
        let entry = TTEntry {
            score,
            bound_type,
            best_move,
        };

        if self.table.insert((board, depth), entry).is_some() {
            self.overwrites += 1;
        }
    }

    /// Probe TT and return both cutoff score (if applicable) and best move (if exists).
    /// Returns (Some(score), best_move) if early cutoff possible, (None, best_move) otherwise.
    pub fn probe_with_move(
        &mut self,
        board: &Board,
        depth: u8,
        alpha: f64,
        beta: f64,
    ) -> (Option<f64>, Option<DamaMove>) {
        let entry = match self.table.get(&(*board, depth)) {
            Some(entry) => entry,
            None => return (None, None),
        };
        let best_move = entry.best_move.clone();

        match entry.bound_type {
            BoundType::Exact => {
                self.hits += 1;
                (Some(entry.score), best_move)
            }
            BoundType::Lower if entry.score >= beta => {
                self.hits += 1;
                (Some(beta), best_move)
            }
            BoundType::Upper if entry.score <= alpha => {
                self.hits += 1;
                (Some(alpha), best_move)
            }
            _ => {
                self.bound_rejected += 1;
                // Entry exists but doesn't allow cutoff - return move for ordering
                (None, best_move)
            }
        }
    }

    pub fn get_move(&self, board: &Board, depth: u8) -> Option<&DamaMove> {
        self.table
            .get(&(*board, depth))
            .and_then(|entry| entry.best_move.as_ref())
    }

    pub fn clear(&mut self) {
        self.table.clear();
        self.hits = 0;
        self.bound_rejected = 0;
        self.overwrites = 0;
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn size(&self) -> usize {
        self.table.len()
    }

    pub fn bound_rejected(&self) -> usize {
        self.bound_rejected
    }

    pub fn overwrites(&self) -> usize {
        self.overwrites
    }
}
