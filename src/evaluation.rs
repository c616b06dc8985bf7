//! negamax_chess - Position Evaluation Module
//!
//! Static evaluation is a pluggable strategy: search only relies on the
//! `Evaluator` trait and its sign convention (positive = good for the side to
//! move). The default strategy scores material plus piece-square tables.

use crate::board::{Board, Move};
use crate::types::*;

/// Static scoring strategy consumed by the search
pub trait Evaluator {
    /// Score `board` from the point of view of the side to move
    fn evaluate(&self, board: &Board) -> i32;
}

impl<F> Evaluator for F
where
    F: Fn(&Board) -> i32,
{
    fn evaluate(&self, board: &Board) -> i32 {
        self(board)
    }
}

// ============================================================================
// PIECE VALUES
// ============================================================================

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20000;

/// Material both sides must be at or under for the endgame king table
const ENDGAME_MATERIAL: i32 = 1300;

#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

// ============================================================================
// PIECE-SQUARE TABLES
// ============================================================================
// White's point of view, a1 first. Black reads them rank-mirrored.

const PAWN_PST: [i32; 64] = [
    0,   0,   0,   0,   0,   0,   0,   0,   // Rank 1
    5,  10,  10, -20, -20,  10,  10,   5,   // Rank 2
    5,  -5, -10,   0,   0, -10,  -5,   5,   // Rank 3
    0,   0,   0,  20,  20,   0,   0,   0,   // Rank 4
    5,   5,  10,  25,  25,  10,   5,   5,   // Rank 5
   10,  10,  20,  30,  30,  20,  10,  10,   // Rank 6
   50,  50,  50,  50,  50,  50,  50,  50,   // Rank 7
    0,   0,   0,   0,   0,   0,   0,   0,   // Rank 8
];

const KNIGHT_PST: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

const BISHOP_PST: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

const ROOK_PST: [i32; 64] = [
    0,   0,   0,   5,   5,   0,   0,   0,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
   -5,   0,   0,   0,   0,   0,   0,  -5,
    5,  10,  10,  10,  10,  10,  10,   5,
    0,   0,   0,   0,   0,   0,   0,   0,
];

const QUEEN_PST: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -10,   5,   5,   5,   5,   5,   0, -10,
     0,   0,   5,   5,   5,   5,   0,  -5,
    -5,   0,   5,   5,   5,   5,   0,  -5,
   -10,   0,   5,   5,   5,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

const KING_MIDDLEGAME_PST: [i32; 64] = [
    20,  30,  10,   0,   0,  10,  30,  20,
    20,  20,   0,   0,   0,   0,  20,  20,
   -10, -20, -20, -20, -20, -20, -20, -10,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
];

const KING_ENDGAME_PST: [i32; 64] = [
   -50, -30, -30, -30, -30, -30, -30, -50,
   -30, -30,   0,   0,   0,   0, -30, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -20, -10,   0,   0, -10, -20, -30,
   -50, -40, -30, -20, -20, -30, -40, -50,
];

/// Get piece-square table value for a piece
fn pst_value(piece: Piece, sq: Square, is_endgame: bool) -> i32 {
    let pst = match piece.kind {
        PieceKind::Pawn => &PAWN_PST,
        PieceKind::Knight => &KNIGHT_PST,
        PieceKind::Bishop => &BISHOP_PST,
        PieceKind::Rook => &ROOK_PST,
        PieceKind::Queen => &QUEEN_PST,
        PieceKind::King if is_endgame => &KING_ENDGAME_PST,
        PieceKind::King => &KING_MIDDLEGAME_PST,
    };

    let index = match piece.color {
        Color::White => sq.index(),
        Color::Black => (7 - sq.rank() as usize) * 8 + sq.file() as usize,
    };

    pst[index]
}

/// Non-king material for (white, black)
fn count_material(board: &Board) -> (i32, i32) {
    board
        .pieces()
        .filter(|(_, p)| p.kind != PieceKind::King)
        .fold((0, 0), |(white, black), (_, p)| match p.color {
            Color::White => (white + piece_value(p.kind), black),
            Color::Black => (white, black + piece_value(p.kind)),
        })
}

/// Determine if the position is an endgame
fn is_endgame(board: &Board) -> bool {
    let (white_material, black_material) = count_material(board);
    white_material <= ENDGAME_MATERIAL && black_material <= ENDGAME_MATERIAL
}

/// Flip a white-relative score to the side to move
#[inline]
fn relative(board: &Board, white_score: i32) -> i32 {
    match board.side_to_move() {
        Color::White => white_score,
        Color::Black => -white_score,
    }
}

/// Material plus piece-square tables; the default strategy
#[derive(Clone, Copy, Debug, Default)]
pub struct PieceSquareEvaluator;

impl Evaluator for PieceSquareEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let endgame = is_endgame(board);
        let score: i32 = board
            .pieces()
            .map(|(sq, piece)| {
                let value = piece_value(piece.kind) + pst_value(piece, sq, endgame);
                match piece.color {
                    Color::White => value,
                    Color::Black => -value,
                }
            })
            .sum();

        relative(board, score)
    }
}

/// Material count only
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let (white, black) = count_material(board);
        relative(board, white - black)
    }
}

/// Evaluate a move for move ordering (captures, promotions)
///
/// Captures score by MVV-LVA (Most Valuable Victim - Least Valuable
/// Attacker) above promotions, which score above quiet moves (0).
pub fn evaluate_move(mv: &Move) -> i32 {
    let mut score = 0;

    if let Some(victim) = mv.captured {
        score += 1_000_000 + 10 * piece_value(victim.kind) - piece_value(mv.piece.kind);
    }

    if let Some(kind) = mv.promotion {
        score += 900_000 + piece_value(kind);
    }

    score
}
