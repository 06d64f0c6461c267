//! Time-bounded alpha-beta search.
//!
//! # Core Algorithm
//!
//! Minimax with alpha-beta pruning, scored from the point of view of the player
//! the search was started for. A position whose side to move has no legal move
//! is a loss for that side and is scored as a decided game, adjusted by the
//! remaining depth so faster wins are preferred and faster losses avoided.
//!
//! ## Iterative Deepening
//! Searches at increasing depths (1, 2, 3, ...) until the time budget runs out
//! or the configured maximum depth is reached. The best move from depth N-1 is
//! searched first at depth N. A depth interrupted by the deadline is thrown
//! away entirely; the result always comes from the last fully completed depth.
//!
//! ## Deadline
//! The clock is checked at every node. When it expires the search unwinds with
//! `SearchError::Timeout`, which the iterative deepening loop absorbs.
//!
//! ## Transposition Table
//! Cleared at the start of every call. Entries are keyed by position and exact
//! remaining depth and carry a bound type, so scores from cut-off subtrees are
//! never mistaken for exact values.

use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;

use crate::board::color::Color;
use crate::board::error::BoardError;
use crate::board::Board;
use crate::dama_move::DamaMove;
use crate::evaluate::{self, Evaluator, PROVEN_SCORE_THRESHOLD};
use crate::move_generator::MoveGenerator;

use super::transposition_table::{BoundType, TranspositionTable};

#[derive(Error, Debug, PartialEq)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("search deadline reached")]
    Timeout,
    #[error("board error: {0}")]
    Board(#[from] BoardError),
}

/// Search configuration parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub time_limit: Duration,
    pub max_depth: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(1),
            max_depth: 64,
        }
    }
}

impl EngineConfig {
    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self {
            time_limit,
            ..Self::default()
        }
    }
}

/// Statistics collected during search.
#[derive(Default)]
struct SearchStats {
    position_count: usize,
    completed_depth: u8,
    last_score: Option<f64>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_result(&mut self, score: Option<f64>, duration: Duration) {
        self.last_score = score;
        self.last_duration = Some(duration);
    }
}

/// Owns everything a search call needs besides the position: configuration,
/// the per-call transposition table and statistics.
pub struct SearchContext {
    config: EngineConfig,
    stats: SearchStats,
    transposition_table: TranspositionTable,
    move_generator: MoveGenerator,
    deadline: Option<Instant>,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl SearchContext {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            stats: SearchStats::default(),
            transposition_table: TranspositionTable::new(),
            move_generator: MoveGenerator::new(),
            deadline: None,
        }
    }

    pub fn with_time_limit(time_limit: Duration) -> Self {
        Self::new(EngineConfig::with_time_limit(time_limit))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_time_limit(&mut self, time_limit: Duration) {
        self.config.time_limit = time_limit;
    }

    pub fn set_max_depth(&mut self, max_depth: u8) {
        self.config.max_depth = max_depth;
    }

    pub fn move_generator(&self) -> &MoveGenerator {
        &self.move_generator
    }

    /// Starts a new top-level search: fresh table, fresh stats, new deadline.
    fn begin(&mut self) {
        self.stats.reset();
        self.transposition_table.clear();
        self.deadline = Some(Instant::now() + self.config.time_limit);
    }

    fn check_deadline(&self) -> Result<(), SearchError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(SearchError::Timeout),
            _ => Ok(()),
        }
    }

    pub fn searched_position_count(&self) -> usize {
        self.stats.position_count
    }

    pub fn completed_depth(&self) -> u8 {
        self.stats.completed_depth
    }

    pub fn last_score(&self) -> Option<f64> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }

    pub fn tt_hits(&self) -> usize {
        self.transposition_table.hits()
    }

    pub fn tt_size(&self) -> usize {
        self.transposition_table.size()
    }
}

/// The move chosen by `find_best_move`.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
    pub best_move: DamaMove,
    /// Score from the searching player's point of view at `depth`; `None` when
    /// no search was needed or none completed.
    pub score: Option<f64>,
    pub depth: u8,
    pub nodes: usize,
    /// True when the deadline hit before depth 1 finished and the move was
    /// picked without evaluation.
    pub fallback: bool,
}

/// One ranked root move of an analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateLine {
    pub dama_move: DamaMove,
    /// Expected continuation starting with `dama_move`.
    pub variation: Vec<DamaMove>,
    pub score: f64,
    pub win_probability: f64,
}

impl CandidateLine {
    /// The variation in coordinate notation, e.g. `a3-a4 b6-b5`.
    pub fn notation(&self) -> String {
        self.variation
            .iter()
            .map(DamaMove::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    pub win_probability: f64,
    pub top_moves: Vec<CandidateLine>,
    pub nodes: usize,
    pub depth: u8,
}

/// Updates best score and move if new score is better.
/// Returns true if best_score was updated.
fn update_best(
    score: f64,
    candidate_move: &DamaMove,
    maximizing_player: bool,
    best_score: &mut f64,
    best_move: &mut Option<DamaMove>,
) -> bool {
    let is_better = if maximizing_player {
        score > *best_score
    } else {
        score < *best_score
    };

    if is_better || best_move.is_none() {
        *best_score = score;
        *best_move = Some(candidate_move.clone());
    }
    is_better
}

/// Moves `preferred` to the front, keeping the order of the rest.
fn prioritize(moves: &mut [DamaMove], preferred: Option<&DamaMove>) {
    if let Some(preferred) = preferred {
        if let Some(pos) = moves.iter().position(|m| m == preferred) {
            if pos > 0 {
                moves[0..=pos].rotate_right(1);
            }
        }
    }
}

/// Searches for the best move for `player` within the context's time budget.
///
/// Root candidates are filtered against `history` so the engine never steers
/// into a third repetition when it has an alternative. The call always yields
/// a move when one is legal: if not even depth 1 completes in time, an
/// arbitrary legal move is returned with `fallback` set.
///
/// # Returns
///
/// - `Ok(outcome)` - The best move from the last completed depth
/// - `Err(SearchError::DepthTooLow)` - If the configured maximum depth is 0
/// - `Err(SearchError::NoAvailableMoves)` - If `player` has no legal move
#[must_use = "search returns the best move found"]
pub fn find_best_move<E: Evaluator + ?Sized>(
    context: &mut SearchContext,
    board: &Board,
    player: Color,
    history: &[Board],
    evaluator: &E,
) -> Result<SearchOutcome, SearchError> {
    if context.config.max_depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    context.begin();
    let start = Instant::now();

    let mut candidates = context
        .move_generator
        .generate_moves_with_history(board, player, history)
        .into_moves();

    if candidates.is_empty() {
        return Err(SearchError::NoAvailableMoves);
    }

    if candidates.len() == 1 {
        debug!("only one legal move, skipping search");
        context.stats.record_result(None, start.elapsed());
        return Ok(SearchOutcome {
            best_move: candidates.remove(0),
            score: None,
            depth: 0,
            nodes: 0,
            fallback: false,
        });
    }

    let mut best: Option<(DamaMove, f64)> = None;

    for depth in 1..=context.config.max_depth {
        prioritize(&mut candidates, best.as_ref().map(|(m, _)| m));

        match search_root(context, board, player, &candidates, depth, evaluator) {
            Ok((score, Some(found))) => {
                debug!(
                    "depth {} complete: best {} score {:.2} ({} positions)",
                    depth,
                    found,
                    score,
                    context.searched_position_count()
                );
                context.stats.completed_depth = depth;
                best = Some((found, score));
                if score.abs() >= PROVEN_SCORE_THRESHOLD {
                    break;
                }
            }
            Ok((_, None)) => return Err(SearchError::NoAvailableMoves),
            Err(SearchError::Timeout) => {
                debug!("deadline reached during depth {}", depth);
                break;
            }
            Err(err) => return Err(err),
        }
    }

    let nodes = context.searched_position_count();
    let outcome = match best {
        Some((best_move, score)) => SearchOutcome {
            best_move,
            score: Some(score),
            depth: context.stats.completed_depth,
            nodes,
            fallback: false,
        },
        None => {
            let index = fastrand::usize(..candidates.len());
            debug!("no depth completed, falling back to an arbitrary move");
            SearchOutcome {
                best_move: candidates.swap_remove(index),
                score: None,
                depth: 0,
                nodes,
                fallback: true,
            }
        }
    };

    context.stats.record_result(outcome.score, start.elapsed());
    Ok(outcome)
}

/// Ranks every legal root move for `player` and reports the `top_n` best as
/// candidate lines with their expected continuations.
///
/// Each root move gets an exact score (full window) at every completed depth;
/// the ranking comes from the deepest depth finished before the deadline. If
/// none finished, moves are ranked by the static evaluation of the position
/// they lead to.
pub fn analyze<E: Evaluator + ?Sized>(
    context: &mut SearchContext,
    board: &Board,
    player: Color,
    evaluator: &E,
    top_n: usize,
) -> Result<Analysis, SearchError> {
    if context.config.max_depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    context.begin();
    let start = Instant::now();

    let candidates = context.move_generator.generate_moves(board, player);
    if candidates.is_empty() {
        return Ok(Analysis {
            win_probability: 0.0,
            top_moves: Vec::new(),
            nodes: 0,
            depth: 0,
        });
    }

    let mut ranked: Option<Vec<(DamaMove, f64)>> = None;
    for depth in 1..=context.config.max_depth {
        match score_root_moves(context, board, player, candidates.moves(), depth, evaluator) {
            Ok(scores) => {
                context.stats.completed_depth = depth;
                ranked = Some(scores);
            }
            Err(SearchError::Timeout) => break,
            Err(err) => return Err(err),
        }
    }

    let depth = context.stats.completed_depth;
    let mut ranked = match ranked {
        Some(scores) => scores,
        None => candidates
            .iter()
            .map(|m| -> Result<(DamaMove, f64), SearchError> {
                let next = m.apply(board)?;
                Ok((m.clone(), evaluator.evaluate(&next, player)))
            })
            .collect::<Result<Vec<_>, _>>()?,
    };

    // stable, so equal scores keep generator order
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let overall = ranked.first().map(|(_, score)| *score).unwrap_or(f64::MIN);
    let mut top_moves = Vec::with_capacity(top_n.min(ranked.len()));
    for (dama_move, score) in ranked.into_iter().take(top_n) {
        let variation = principal_variation(context, board, &dama_move, depth)?;
        top_moves.push(CandidateLine {
            dama_move,
            variation,
            score,
            win_probability: evaluate::win_probability(score),
        });
    }

    context.stats.record_result(Some(overall), start.elapsed());
    Ok(Analysis {
        win_probability: evaluate::win_probability(overall),
        top_moves,
        nodes: context.searched_position_count(),
        depth,
    })
}

/// Rebuilds the expected line after `first_move` by following the best moves
/// stored in the transposition table, trying shallower entries when the exact
/// depth is missing. Each stored move is re-derived from the move generator,
/// so only legal moves make it into the line.
fn principal_variation(
    context: &SearchContext,
    board: &Board,
    first_move: &DamaMove,
    depth: u8,
) -> Result<Vec<DamaMove>, SearchError> {
    let mut line = vec![first_move.clone()];
    let mut position = first_move.apply(board)?;

    for ply in 1..depth {
        let remaining = depth - ply;
        let stored = (1..=remaining)
            .rev()
            .find_map(|d| context.transposition_table.get_move(&position, d));
        let stored = match stored {
            Some(stored) => stored,
            None => break,
        };

        let legal = context
            .move_generator
            .generate_moves(&position, position.turn());
        let next_move = match legal.iter().find(|m| *m == stored) {
            Some(m) => m.clone(),
            None => break,
        };

        position = next_move.apply(&position)?;
        line.push(next_move);
    }

    Ok(line)
}

fn search_root<E: Evaluator + ?Sized>(
    context: &mut SearchContext,
    board: &Board,
    player: Color,
    candidates: &[DamaMove],
    depth: u8,
    evaluator: &E,
) -> Result<(f64, Option<DamaMove>), SearchError> {
    let mut best_score = f64::NEG_INFINITY;
    let mut best_move = None;
    let mut alpha = f64::NEG_INFINITY;
    let beta = f64::INFINITY;

    for dama_move in candidates.iter() {
        let next = dama_move.apply(board)?;
        let score = alpha_beta_minimax(
            context,
            &next,
            player.opposite(),
            player,
            depth - 1,
            alpha,
            beta,
            evaluator,
        )?;

        update_best(score, dama_move, true, &mut best_score, &mut best_move);
        alpha = alpha.max(score);
    }

    context.transposition_table.store(
        *board,
        depth,
        best_score,
        BoundType::Exact,
        best_move.clone(),
    );

    Ok((best_score, best_move))
}

fn score_root_moves<E: Evaluator + ?Sized>(
    context: &mut SearchContext,
    board: &Board,
    player: Color,
    candidates: &[DamaMove],
    depth: u8,
    evaluator: &E,
) -> Result<Vec<(DamaMove, f64)>, SearchError> {
    let mut scores = Vec::with_capacity(candidates.len());
    for dama_move in candidates.iter() {
        let next = dama_move.apply(board)?;
        let score = alpha_beta_minimax(
            context,
            &next,
            player.opposite(),
            player,
            depth - 1,
            f64::NEG_INFINITY,
            f64::INFINITY,
            evaluator,
        )?;
        scores.push((dama_move.clone(), score));
    }
    Ok(scores)
}

#[allow(clippy::too_many_arguments)]
fn alpha_beta_minimax<E: Evaluator + ?Sized>(
    context: &mut SearchContext,
    board: &Board,
    to_move: Color,
    root_player: Color,
    depth: u8,
    mut alpha: f64,
    mut beta: f64,
    evaluator: &E,
) -> Result<f64, SearchError> {
    context.check_deadline()?;
    context.stats.position_count += 1;

    let maximizing_player = to_move == root_player;

    let mut candidates = context.move_generator.generate_moves(board, to_move).into_moves();
    if candidates.is_empty() {
        // the side to move is blocked or has no pieces left
        return Ok(evaluate::terminal_score(!maximizing_player, depth));
    }

    if depth == 0 {
        return Ok(evaluator.evaluate(board, root_player));
    }

    let (cutoff_score, tt_move) =
        context
            .transposition_table
            .probe_with_move(board, depth, alpha, beta);
    if let Some(score) = cutoff_score {
        return Ok(score);
    }
    prioritize(&mut candidates, tt_move.as_ref());

    let original_alpha = alpha;
    let original_beta = beta;
    let mut best_score = if maximizing_player {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    let mut best_move = None;

    for dama_move in candidates.iter() {
        let next = dama_move.apply(board)?;
        let score = alpha_beta_minimax(
            context,
            &next,
            to_move.opposite(),
            root_player,
            depth - 1,
            alpha,
            beta,
            evaluator,
        )?;

        update_best(
            score,
            dama_move,
            maximizing_player,
            &mut best_score,
            &mut best_move,
        );

        if maximizing_player {
            alpha = alpha.max(score);
        } else {
            beta = beta.min(score);
        }
        if beta <= alpha {
            break;
        }
    }

    let bound_type = if best_score <= original_alpha {
        BoundType::Upper
    } else if best_score >= original_beta {
        BoundType::Lower
    } else {
        BoundType::Exact
    };
    context
        .transposition_table
        .store(*board, depth, best_score, bound_type, best_move);

    Ok(best_score)
}
