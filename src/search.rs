//! negamax_chess - Search Engine Module
//!
//! This module implements the best-move search:
//! - Negamax with alpha-beta pruning
//! - Quiescence search over captures and promotions (all moves in check)
//! - MVV-LVA move ordering
//! - Mate scores that prefer the shortest mate

use log::{debug, info, warn};

use crate::board::{Board, Move};
use crate::evaluation::{Evaluator, PieceSquareEvaluator};
use crate::move_generator::MoveGenerator;

// Constants for search
pub const INFINITY: i32 = 100_000;
pub const MATE_SCORE: i32 = 50_000;
pub const MAX_PLY: u32 = 128;

/// Deepest nominal search accepted; leaves room for quiescence below it
const MAX_DEPTH: u32 = 64;

/// Quiescence plies that still fit under `MAX_PLY` at the deepest search
const MAX_QUIESCENCE_PLY: u32 = MAX_PLY - MAX_DEPTH;

/// True when `score` encodes a forced mate for either side
#[inline]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE - MAX_PLY as i32
}

/// Plies until mate for a mate score, `None` otherwise
pub fn mate_distance(score: i32) -> Option<u32> {
    if is_mate_score(score) {
        Some((MATE_SCORE - score.abs()) as u32)
    } else {
        None
    }
}

/// Tunables for a search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Hard cap on quiescence plies below the nominal depth
    pub quiescence_max_ply: u32,
    /// Sort captures and promotions first at every node
    pub order_moves: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            quiescence_max_ply: 8,
            order_moves: true,
        }
    }
}

/// Why the root position has no move to play
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminal {
    Checkmate,
    Stalemate,
}

/// Outcome of `SearchEngine::find_best_move`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    /// From the point of view of the side to move at the root
    pub score: i32,
    pub terminal: Option<Terminal>,
    pub nodes: u64,
}

pub struct SearchEngine<E: Evaluator = PieceSquareEvaluator> {
    move_generator: MoveGenerator,
    evaluator: E,
    config: SearchConfig,
    pub nodes_searched: u64,
}

impl SearchEngine {
    pub fn new() -> Self {
        SearchEngine::with_evaluator(PieceSquareEvaluator)
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new()
    }
}

impl<E: Evaluator> SearchEngine<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        SearchEngine::with_config(evaluator, SearchConfig::default())
    }

    pub fn with_config(evaluator: E, mut config: SearchConfig) -> Self {
        if config.quiescence_max_ply > MAX_QUIESCENCE_PLY {
            warn!(
                "quiescence depth {} clamped to {MAX_QUIESCENCE_PLY}",
                config.quiescence_max_ply
            );
            config.quiescence_max_ply = MAX_QUIESCENCE_PLY;
        }

        SearchEngine {
            move_generator: MoveGenerator::new(),
            evaluator,
            config,
            nodes_searched: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `board` to a fixed depth and return the best root move
    ///
    /// The board is borrowed mutably for the duration of the search and is
    /// handed back in exactly the state it was passed in.
    pub fn find_best_move(&mut self, board: &mut Board, depth: u32) -> SearchResult {
        let depth = match depth {
            0 => {
                warn!("search depth 0 requested, searching depth 1");
                1
            }
            d if d > MAX_DEPTH => {
                warn!("search depth {d} clamped to {MAX_DEPTH}");
                MAX_DEPTH
            }
            d => d,
        };

        self.nodes_searched = 0;

        let mut moves = self.move_generator.generate_legal_moves(board);
        if moves.is_empty() {
            let (terminal, score) = if board.is_in_check() {
                (Terminal::Checkmate, -MATE_SCORE)
            } else {
                (Terminal::Stalemate, 0)
            };
            info!("no legal moves for {}: {:?}", board.side_to_move(), terminal);
            return SearchResult {
                best_move: None,
                score,
                terminal: Some(terminal),
                nodes: 0,
            };
        }

        self.order(&mut moves);

        let mut best_move = moves[0];
        let mut best_score = -INFINITY;

        for mv in moves {
            let undo = board.make_move(&mv);
            let score = -self.negamax(board, depth - 1, 1, -INFINITY, INFINITY);
            board.unmake_move(&undo);

            debug!("root move {mv} scored {score}");

            if score > best_score {
                best_score = score;
                best_move = mv;
            }
        }

        info!(
            "depth {} best {} score {} nodes {}",
            depth, best_move, best_score, self.nodes_searched
        );

        SearchResult {
            best_move: Some(best_move),
            score: best_score,
            terminal: None,
            nodes: self.nodes_searched,
        }
    }

    /// Fail-hard negamax with alpha-beta pruning
    ///
    /// `ply` is the distance from the root and only feeds the mate score.
    pub fn negamax(
        &mut self,
        board: &mut Board,
        depth: u32,
        ply: u32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        if depth == 0 {
            return self.quiescence(board, ply, 0, alpha, beta);
        }

        self.nodes_searched += 1;

        let mut moves = self.move_generator.generate_legal_moves(board);
        if moves.is_empty() {
            return self.terminal_score(board, ply);
        }

        self.order(&mut moves);

        let mut best_score = -INFINITY;
        for mv in moves {
            let undo = board.make_move(&mv);
            let score = -self.negamax(board, depth - 1, ply + 1, -beta, -alpha);
            board.unmake_move(&undo);

            best_score = best_score.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                return beta;
            }
        }

        best_score
    }

    /// Resolve captures and promotions until the position is quiet
    ///
    /// Stops at `quiescence_max_ply` plies below the nominal depth.
    pub fn quiescence(
        &mut self,
        board: &mut Board,
        ply: u32,
        qply: u32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.nodes_searched += 1;

        let mut moves = self.move_generator.generate_legal_moves(board);
        if moves.is_empty() {
            return self.terminal_score(board, ply);
        }

        let stand_pat = self.evaluator.evaluate(board);
        if stand_pat >= beta {
            return beta;
        }
        alpha = alpha.max(stand_pat);

        if qply >= self.config.quiescence_max_ply {
            return alpha;
        }

        self.move_generator
            .retain_tactical(&mut moves, board.is_in_check());
        self.order(&mut moves);

        for mv in moves {
            let undo = board.make_move(&mv);
            let score = -self.quiescence(board, ply + 1, qply + 1, -beta, -alpha);
            board.unmake_move(&undo);

            if score >= beta {
                return beta;
            }
            alpha = alpha.max(score);
        }

        alpha
    }

    /// Score of a node without legal moves
    #[inline]
    fn terminal_score(&self, board: &Board, ply: u32) -> i32 {
        if board.is_in_check() {
            -(MATE_SCORE - ply as i32)
        } else {
            0
        }
    }

    #[inline]
    fn order(&self, moves: &mut [Move]) {
        if self.config.order_moves {
            self.move_generator.order_moves(moves);
        }
    }
}
