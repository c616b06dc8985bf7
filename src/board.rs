//! negamax_chess - Board Representation Module
//!
//! This module provides the core data structures for representing a chess
//! board and moves. It includes reversible move execution, attack queries and
//! the draw bookkeeping helpers. FEN import and export live in `fen`.

use std::fmt;

use crate::error::{ChessError, Result};
use crate::types::*;

/// Starting position FEN
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// (file, rank) steps for sliding and stepping pieces
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, 1), (1, 1), (1, -1), (-1, -1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1), (0, -1), (-1, 0), (1, 0),
    (-1, 1), (1, 1), (1, -1), (-1, -1),
];
pub const KING_OFFSETS: [(i8, i8); 8] = QUEEN_DIRECTIONS;
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (-1, 2), (2, 1), (-2, 1),
    (2, -1), (-2, -1), (1, -2), (-1, -2),
];

/// How a move affects the board beyond moving one piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet,
    Capture,
    DoublePawnPush,
    EnPassant,
    CastleKingside,
    CastleQueenside,
}

/// Represents a chess move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub promotion: Option<PieceKind>,
    pub kind: MoveKind,
}

impl Move {
    /// Create a plain move or capture
    pub fn new(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> Self {
        Move {
            from,
            to,
            piece,
            captured,
            promotion: None,
            kind: if captured.is_some() { MoveKind::Capture } else { MoveKind::Quiet },
        }
    }

    /// Create a pawn double push
    pub fn double_push(from: Square, to: Square, piece: Piece) -> Self {
        Move {
            kind: MoveKind::DoublePawnPush,
            ..Move::new(from, to, piece, None)
        }
    }

    /// Create a promotion move, capturing or not
    pub fn with_promotion(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        promotion: PieceKind,
    ) -> Self {
        Move {
            promotion: Some(promotion),
            ..Move::new(from, to, piece, captured)
        }
    }

    /// Create an en passant capture
    pub fn en_passant(from: Square, to: Square, piece: Piece, captured: Piece) -> Self {
        Move {
            kind: MoveKind::EnPassant,
            ..Move::new(from, to, piece, Some(captured))
        }
    }

    /// Create a castling move (king's from/to squares)
    pub fn castling(from: Square, to: Square, piece: Piece, kingside: bool) -> Self {
        Move {
            kind: if kingside { MoveKind::CastleKingside } else { MoveKind::CastleQueenside },
            ..Move::new(from, to, piece, None)
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    #[inline]
    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::CastleKingside | MoveKind::CastleQueenside)
    }

    /// Convert move to UCI notation (e.g., "e2e4", "e7e8q")
    pub fn to_uci(&self) -> String {
        let mut uci = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            uci.push(kind.to_char());
        }
        uci
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uci())
    }
}

/// Information needed to undo a move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UndoInfo {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    /// Board ply count right after this move was applied
    pub plies: u32,
}

/// Rook (from, to) squares for a castling move of `color`
pub fn castle_rook_squares(color: Color, kingside: bool) -> (Square, Square) {
    match (color, kingside) {
        (Color::White, true) => (Square::H1, Square::F1),
        (Color::White, false) => (Square::A1, Square::D1),
        (Color::Black, true) => (Square::H8, Square::F8),
        (Color::Black, false) => (Square::A8, Square::D8),
    }
}

/// Square holding the pawn an en passant move removes
#[inline]
fn en_passant_victim(mv: &Move) -> Square {
    mv.to.with_rank(mv.from.rank())
}

/// Chess board representation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// 64-element array representing the board (0=a1, 1=b1, ..., 63=h8)
    squares: [Option<Piece>; 64],
    side_to_move: Color,
    castling_rights: CastlingRights,
    /// Square a pawn skipped over on the previous move
    en_passant_square: Option<Square>,
    /// Moves since last pawn move or capture (for 50-move rule)
    halfmove_clock: u32,
    fullmove_number: u32,
    /// Cached king squares, indexed by `Color::index`
    king_squares: [Square; 2],
    /// Moves applied since this board was built
    plies: u32,
}

impl Board {
    /// Create a board with the starting position
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back_rank.iter().enumerate() {
            let file = file as u8;
            for color in [Color::White, Color::Black] {
                let pawn_rank = color.pawn_start_rank();
                let back = color.back_rank();
                board.squares[(back * 8 + file) as usize] = Some(Piece::new(color, kind));
                board.squares[(pawn_rank * 8 + file) as usize] =
                    Some(Piece::new(color, PieceKind::Pawn));
            }
        }
        board.castling_rights = CastlingRights::ALL;
        board.king_squares = [Square::E1, Square::E8];
        board
    }

    /// Board with no pieces; callers must place both kings before use
    pub(crate) fn empty() -> Self {
        Board {
            squares: [None; 64],
            side_to_move: Color::White,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            king_squares: [Square::E1, Square::E8],
            plies: 0,
        }
    }

    /// Place or clear a piece while building a position
    pub(crate) fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.squares[sq.index()] = piece;
        if let Some(p) = piece {
            if p.kind == PieceKind::King {
                self.king_squares[p.color.index()] = sq;
            }
        }
    }

    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights;
    }

    pub(crate) fn set_en_passant_square(&mut self, sq: Option<Square>) {
        self.en_passant_square = sq;
    }

    pub(crate) fn set_clocks(&mut self, halfmove_clock: u32, fullmove_number: u32) {
        self.halfmove_clock = halfmove_clock;
        self.fullmove_number = fullmove_number;
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Number of moves currently applied on top of the initial position
    #[inline]
    pub fn plies(&self) -> u32 {
        self.plies
    }

    /// Square of the king of the specified color
    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Every occupied square with its piece, a1 first
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    /// Execute a move on the board. Returns UndoInfo for undoing the move later.
    ///
    /// The move must come from the move generator for this exact position;
    /// castling is not re-validated here.
    pub fn make_move(&mut self, mv: &Move) -> UndoInfo {
        let us = self.side_to_move;
        let moved = self.squares[mv.from.index()].unwrap_or(mv.piece);
        debug_assert_eq!(moved.color, us, "moving a piece of the wrong color");

        let capture_sq = if mv.kind == MoveKind::EnPassant {
            en_passant_victim(mv)
        } else {
            mv.to
        };
        let captured = self.squares[capture_sq.index()].take();

        // Save undo information
        let undo = UndoInfo {
            mv: *mv,
            moved_piece: moved,
            captured_piece: captured,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            plies: self.plies + 1,
        };

        // Move the piece, promoting if needed
        self.squares[mv.from.index()] = None;
        let placed = match mv.promotion {
            Some(kind) => Piece::new(us, kind),
            None => moved,
        };
        self.squares[mv.to.index()] = Some(placed);

        // Handle castling
        if mv.is_castling() {
            let (rook_from, rook_to) =
                castle_rook_squares(us, mv.kind == MoveKind::CastleKingside);
            let rook = self.squares[rook_from.index()].take();
            self.squares[rook_to.index()] = rook;
        }

        // Update castling rights
        if moved.kind == PieceKind::King {
            self.king_squares[us.index()] = mv.to;
            self.castling_rights.clear_color(us);
        }
        // If rook moves or is captured
        self.castling_rights.clear_corner(mv.from);
        self.castling_rights.clear_corner(mv.to);

        // Update en passant square
        self.en_passant_square = None;
        if moved.kind == PieceKind::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            let skipped = (mv.from.rank() + mv.to.rank()) / 2;
            self.en_passant_square = Some(mv.from.with_rank(skipped));
        }

        // Update halfmove clock
        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        if us == Color::Black {
            self.fullmove_number += 1;
        }

        self.side_to_move = us.opponent();
        self.plies += 1;

        undo
    }

    /// Undo the most recent move, reporting a protocol violation as an error
    pub fn try_unmake_move(&mut self, undo: &UndoInfo) -> Result<()> {
        let mv = &undo.mv;
        let mover = undo.moved_piece.color;

        if undo.plies != self.plies {
            return Err(ChessError::IllegalMutation(format!(
                "undo record for {} was stamped at ply {} but the board is at ply {}",
                mv, undo.plies, self.plies
            )));
        }
        if self.side_to_move != mover.opponent() {
            return Err(ChessError::IllegalMutation(format!(
                "undo record for {} belongs to {} but {} is to move",
                mv, mover, self.side_to_move
            )));
        }
        let expected = match mv.promotion {
            Some(kind) => Piece::new(mover, kind),
            None => undo.moved_piece,
        };
        if self.squares[mv.to.index()] != Some(expected) {
            return Err(ChessError::IllegalMutation(format!(
                "undo record for {} does not match the piece on {}",
                mv, mv.to
            )));
        }
        // a genuine make always leaves the origin empty
        if let Some(occupant) = self.squares[mv.from.index()] {
            return Err(ChessError::IllegalMutation(format!(
                "undo record for {} would restore onto {} occupied by {}",
                mv,
                mv.from,
                piece_to_fen(occupant)
            )));
        }

        // Restore the moved piece
        self.squares[mv.to.index()] = None;
        self.squares[mv.from.index()] = Some(undo.moved_piece);

        // Restore captured piece
        let capture_sq = if mv.kind == MoveKind::EnPassant {
            en_passant_victim(mv)
        } else {
            mv.to
        };
        self.squares[capture_sq.index()] = undo.captured_piece;

        // Handle castling - move rook back
        if mv.is_castling() {
            let (rook_from, rook_to) =
                castle_rook_squares(mover, mv.kind == MoveKind::CastleKingside);
            let rook = self.squares[rook_to.index()].take();
            self.squares[rook_from.index()] = rook;
        }

        if undo.moved_piece.kind == PieceKind::King {
            self.king_squares[mover.index()] = mv.from;
        }

        // Restore game state
        self.castling_rights = undo.castling_rights;
        self.en_passant_square = undo.en_passant_square;
        self.halfmove_clock = undo.halfmove_clock;
        self.fullmove_number = undo.fullmove_number;
        self.side_to_move = mover;
        self.plies -= 1;

        Ok(())
    }

    /// Undo a move using saved UndoInfo
    ///
    /// # Panics
    ///
    /// Panics if `undo` is not the record of the most recent move still
    /// applied; continuing would corrupt the position.
    pub fn unmake_move(&mut self, undo: &UndoInfo) {
        if let Err(err) = self.try_unmake_move(undo) {
            panic!("{err}");
        }
    }

    /// Check if a square is attacked by the specified color
    pub fn is_square_attacked(&self, sq: Square, by: Color) -> bool {
        let holds = |target: Option<Square>, kind: PieceKind| {
            target.and_then(|t| self.piece_at(t)) == Some(Piece::new(by, kind))
        };

        // Pawns attack diagonally forward, so look one rank behind `sq`
        let back = -by.pawn_direction();
        if holds(sq.offset(-1, back), PieceKind::Pawn) || holds(sq.offset(1, back), PieceKind::Pawn) {
            return true;
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&(df, dr)| holds(sq.offset(df, dr), PieceKind::Knight))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(df, dr)| holds(sq.offset(df, dr), PieceKind::King))
        {
            return true;
        }

        ROOK_DIRECTIONS
            .iter()
            .any(|&dir| self.check_sliding_attack(sq, dir, by, PieceKind::Rook))
            || BISHOP_DIRECTIONS
                .iter()
                .any(|&dir| self.check_sliding_attack(sq, dir, by, PieceKind::Bishop))
    }

    /// Check if there's a sliding piece attacking along a direction
    fn check_sliding_attack(&self, sq: Square, (df, dr): (i8, i8), by: Color, slider: PieceKind) -> bool {
        let mut current = sq;
        while let Some(next) = current.offset(df, dr) {
            if let Some(piece) = self.piece_at(next) {
                return piece.color == by && (piece.kind == slider || piece.kind == PieceKind::Queen);
            }
            current = next;
        }
        false
    }

    /// Check if the side to move's king is attacked
    pub fn is_in_check(&self) -> bool {
        let us = self.side_to_move;
        self.is_square_attacked(self.king_square(us), us.opponent())
    }

    /// Check if 50-move rule applies (draw)
    pub fn is_fifty_moves(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// Check for insufficient material to checkmate
    pub fn has_insufficient_material(&self) -> bool {
        let others: Vec<(Square, Piece)> = self
            .pieces()
            .filter(|(_, p)| p.kind != PieceKind::King)
            .collect();

        match others.as_slice() {
            // Only kings left
            [] => true,
            // King and minor piece vs King
            [(_, p)] => matches!(p.kind, PieceKind::Knight | PieceKind::Bishop),
            // King + Bishop vs King + Bishop (same color squares)
            [(sq1, p1), (sq2, p2)] => {
                p1.kind == PieceKind::Bishop
                    && p2.kind == PieceKind::Bishop
                    && p1.color != p2.color
                    && sq1.is_light() == sq2.is_light()
            }
            _ => false,
        }
    }

    /// Display the board as a string
    pub fn display(&self) -> String {
        let mut lines = Vec::new();
        lines.push("  +---+---+---+---+---+---+---+---+".to_string());

        for rank in (0..8u8).rev() {
            let mut row = format!("{} |", rank + 1);
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => row.push_str(&format!(" {} |", piece_to_fen(piece))),
                    None => row.push_str("   |"),
                }
            }
            lines.push(row);
            lines.push("  +---+---+---+---+---+---+---+---+".to_string());
        }
        lines.push("    a   b   c   d   e   f   g   h".to_string());

        lines.join("\n")
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
