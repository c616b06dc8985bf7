//! Error types for the engine
//!
//! Position import failures, malformed square names, and make/unmake
//! protocol violations.

use crate::types::Color;

/// Why a FEN string was rejected
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("expected 6 space-separated fields, found {0}")]
    FieldCount(usize),

    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 squares")]
    RankWidth { rank: u8 },

    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    #[error("invalid active color '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling rights '{0}'")]
    InvalidCastling(String),

    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid halfmove clock '{0}'")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number '{0}'")]
    InvalidFullmoveNumber(String),

    #[error("no {0} king on the board")]
    MissingKing(Color),

    #[error("more than one {0} king on the board")]
    DuplicateKing(Color),

    #[error("pawn on back rank at {0}")]
    PawnOnBackRank(String),

    #[error("{0} king is in check with the opponent to move")]
    OpponentInCheck(Color),
}

/// Unified error type for the engine
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Malformed or structurally invalid position input
    #[error("invalid position '{fen}': {reason}")]
    InvalidPosition { fen: String, reason: PositionError },

    /// Algebraic square name outside a1..h8
    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    /// unmake without a matching make, or with a mismatched record
    #[error("illegal board mutation: {0}")]
    IllegalMutation(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, ChessError>;
