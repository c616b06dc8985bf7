//! negamax_chess - Chess best-move engine
//!
//! A chess engine library with support for:
//! - Full legal move generation (castling, en passant, promotion)
//! - FEN import and export
//! - Reversible make/unmake on a single mutable board
//! - Negamax search with alpha-beta pruning and quiescence
//! - Pluggable static evaluation (material plus piece-square tables)
//! - Perft node counting

pub mod types;
pub mod error;
pub mod board;
pub mod fen;
pub mod move_generator;
pub mod evaluation;
pub mod search;
pub mod perft;

pub use board::{Board, Move, MoveKind, UndoInfo, STARTING_FEN};
pub use error::{ChessError, PositionError, Result};
pub use evaluation::{Evaluator, MaterialEvaluator, PieceSquareEvaluator};
pub use move_generator::MoveGenerator;
pub use search::{SearchConfig, SearchEngine, SearchResult, Terminal};
pub use types::{CastlingRights, Color, Piece, PieceKind, Square};
