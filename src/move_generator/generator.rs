//! Move generation for Turkish draughts.
//!
//! Captures are found with an explicit worklist rather than recursion: each
//! frame carries a scratch board on which the moving piece has already been
//! relocated and the jumped pieces removed, so a chain can never jump the same
//! piece twice. A chain is recorded only when its last landing square offers no
//! further capture.
//!
//! Rules enforced here:
//! - capturing is mandatory whenever any capture exists;
//! - only the chains taking the most pieces are legal (ties keep all);
//! - men step and jump forward or sideways, never backward;
//! - kings slide any distance and capture the first piece met on a line when
//!   it is an enemy with empty squares behind it, landing on any of them.

use log::trace;
use rayon::prelude::*;
use smallvec::{smallvec, SmallVec};

use crate::board::color::Color;
use crate::board::piece::Piece;
use crate::board::square::{Direction, Square};
use crate::board::Board;
use crate::dama_move::{DamaMove, MoveKind, MovePath};

use super::move_set::{DamaMoveList, MoveSet};

/// Minimum number of moves required to justify parallelization overhead when
/// counting positions.
const PARALLEL_MOVE_THRESHOLD: usize = 6;

/// One partially explored capture chain.
struct CaptureFrame {
    board: Board,
    path: MovePath,
    captures: MovePath,
}

/// A single jump: the square of the captured piece and the landing square.
type CaptureStep = (Square, Square);

/// Generates all legal moves for a given board state.
#[derive(Clone, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Enumerates the legal moves for `player`, applying the forced and
    /// longest capture rules.
    pub fn generate_moves(&self, board: &Board, player: Color) -> MoveSet {
        let captures = self.generate_captures(board, player);
        if !captures.is_empty() {
            let longest = captures
                .iter()
                .map(DamaMove::capture_count)
                .max()
                .unwrap_or(0);
            let moves: DamaMoveList = captures
                .into_iter()
                .filter(|m| m.capture_count() == longest)
                .collect();
            return MoveSet::new(MoveKind::Capture, moves);
        }

        MoveSet::new(MoveKind::Normal, self.generate_normal_moves(board, player))
    }

    /// Same as `generate_moves`, but drops moves whose resulting position would
    /// occur for the third time in `history`. When that would leave nothing to
    /// play the unfiltered set is returned.
    pub fn generate_moves_with_history(
        &self,
        board: &Board,
        player: Color,
        history: &[Board],
    ) -> MoveSet {
        let move_set = self.generate_moves(board, player);
        if history.is_empty() {
            return move_set;
        }

        let kind = move_set.kind();
        let allowed: DamaMoveList = move_set
            .iter()
            .filter(|m| match m.apply(board) {
                Ok(next) => history.iter().filter(|&&seen| seen == next).count() < 2,
                Err(_) => false,
            })
            .cloned()
            .collect();

        if allowed.is_empty() {
            trace!("repetition filter removed every move, keeping the full set");
            return move_set;
        }
        MoveSet::new(kind, allowed)
    }

    /// True when `player` has no legal move at all.
    pub fn is_blocked(&self, board: &Board, player: Color) -> bool {
        self.generate_moves(board, player).is_empty()
    }

    /// Counts the legal move sequences from `board`, `depth` plies beyond the
    /// first. Depth 0 returns the number of moves available right now.
    pub fn count_positions(&self, depth: u8, board: &Board, player: Color) -> usize {
        let candidates = self.generate_moves(board, player);
        let initial_count = candidates.len();

        if depth == 0 {
            return initial_count;
        }

        let next_player = player.opposite();
        let count_after = |dama_move: &DamaMove| match dama_move.apply(board) {
            Ok(next) => self.count_positions(depth - 1, &next, next_player),
            Err(_) => 0,
        };

        let inner_count: usize = if candidates.len() >= PARALLEL_MOVE_THRESHOLD {
            candidates.moves().par_iter().map(count_after).sum()
        } else {
            candidates.iter().map(count_after).sum()
        };

        initial_count + inner_count
    }

    fn generate_normal_moves(&self, board: &Board, player: Color) -> DamaMoveList {
        let mut moves = DamaMoveList::new();
        let pieces = board.pieces(player);

        for from in pieces.locate(Piece::Man).squares() {
            for &direction in Direction::ALL.iter() {
                if is_backward(direction, player) {
                    continue;
                }
                if let Some(to) = from.offset(direction, 1) {
                    if board.is_empty_square(to) {
                        moves.push(DamaMove::normal(from, to));
                    }
                }
            }
        }

        for from in pieces.locate(Piece::King).squares() {
            for &direction in Direction::ALL.iter() {
                for to in from.ray(direction) {
                    if !board.is_empty_square(to) {
                        break;
                    }
                    moves.push(DamaMove::normal(from, to));
                }
            }
        }

        moves
    }

    fn generate_captures(&self, board: &Board, player: Color) -> DamaMoveList {
        let mut captures = DamaMoveList::new();
        for (square, piece, color) in board.iter_pieces() {
            if color == player {
                self.generate_piece_captures(board, square, piece, player, &mut captures);
            }
        }
        captures
    }

    /// Explores every capture chain for the piece on `origin`. The piece keeps
    /// its kind for the whole chain; promotion only happens when the move is
    /// applied.
    fn generate_piece_captures(
        &self,
        board: &Board,
        origin: Square,
        piece: Piece,
        player: Color,
        out: &mut DamaMoveList,
    ) {
        let mut stack = vec![CaptureFrame {
            board: *board,
            path: smallvec![origin],
            captures: MovePath::new(),
        }];

        while let Some(frame) = stack.pop() {
            let current = frame.path[frame.path.len() - 1];
            let steps = capture_steps(&frame.board, current, piece, player);

            if steps.is_empty() {
                if frame.path.len() > 1 {
                    out.push(DamaMove::capture(frame.path, frame.captures));
                }
                continue;
            }

            for (captured, landing) in steps {
                let mut next_board = frame.board;
                next_board.remove(captured);
                next_board.relocate(current, landing);

                let mut path = frame.path.clone();
                path.push(landing);
                let mut captures = frame.captures.clone();
                captures.push(captured);

                stack.push(CaptureFrame {
                    board: next_board,
                    path,
                    captures,
                });
            }
        }
    }
}

fn is_backward(direction: Direction, player: Color) -> bool {
    direction.delta().0 == -player.forward()
}

fn is_enemy(board: &Board, square: Square, player: Color) -> bool {
    matches!(board.get(square), Some((_, color)) if color != player)
}

/// All single jumps available from `from` on `board`.
fn capture_steps(
    board: &Board,
    from: Square,
    piece: Piece,
    player: Color,
) -> SmallVec<[CaptureStep; 8]> {
    let mut steps = SmallVec::new();

    match piece {
        Piece::Man => {
            for &direction in Direction::ALL.iter() {
                if is_backward(direction, player) {
                    continue;
                }
                let enemy = from.offset(direction, 1);
                let landing = from.offset(direction, 2);
                if let (Some(enemy), Some(landing)) = (enemy, landing) {
                    if is_enemy(board, enemy, player) && board.is_empty_square(landing) {
                        steps.push((enemy, landing));
                    }
                }
            }
        }
        Piece::King => {
            for &direction in Direction::ALL.iter() {
                let target = from
                    .ray(direction)
                    .find(|&square| !board.is_empty_square(square));
                let enemy = match target {
                    Some(square) if is_enemy(board, square, player) => square,
                    _ => continue,
                };
                for landing in enemy.ray(direction) {
                    if !board.is_empty_square(landing) {
                        break;
                    }
                    steps.push((enemy, landing));
                }
            }
        }
    }

    steps
}
