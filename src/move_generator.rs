//! negamax_chess - Move Generator Module
//!
//! This module handles the generation of legal chess moves, including
//! all special moves (castling, en passant, pawn promotion). Legality is
//! decided by playing each pseudo-legal move on the board and asking whether
//! the mover's king is attacked afterwards.

use crate::board::*;
use crate::evaluation::evaluate_move;
use crate::types::*;

/// Move generator for chess positions
#[derive(Clone, Copy, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    /// Create a new move generator
    pub fn new() -> Self {
        MoveGenerator
    }

    /// Generate all legal moves for the current position
    ///
    /// The board is mutated while testing each candidate and is left exactly
    /// as it was found.
    pub fn generate_legal_moves(&self, board: &mut Board) -> Vec<Move> {
        let pseudo_legal = self.generate_pseudo_legal_moves(board);
        let mut legal_moves = Vec::with_capacity(pseudo_legal.len());

        for mv in pseudo_legal {
            if self.is_legal(board, &mv) {
                legal_moves.push(mv);
            }
        }

        legal_moves
    }

    /// Legal captures and promotions, or every legal move when in check
    pub fn generate_tactical_moves(&self, board: &mut Board) -> Vec<Move> {
        let mut moves = self.generate_legal_moves(board);
        self.retain_tactical(&mut moves, board.is_in_check());
        moves
    }

    /// Narrow an already generated legal move list to its tactical part
    pub fn retain_tactical(&self, moves: &mut Vec<Move>, in_check: bool) {
        if !in_check {
            moves.retain(|mv| mv.is_capture() || mv.is_promotion());
        }
    }

    /// Generate all pseudo-legal moves (may leave king in check)
    pub fn generate_pseudo_legal_moves(&self, board: &Board) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        let color = board.side_to_move();

        for (sq, piece) in board.pieces() {
            if piece.color != color {
                continue;
            }

            match piece.kind {
                PieceKind::Pawn => self.generate_pawn_moves(board, sq, piece, &mut moves),
                PieceKind::Knight => self.generate_step_moves(board, sq, piece, &KNIGHT_OFFSETS, &mut moves),
                PieceKind::Bishop => self.generate_sliding_moves(board, sq, piece, &BISHOP_DIRECTIONS, &mut moves),
                PieceKind::Rook => self.generate_sliding_moves(board, sq, piece, &ROOK_DIRECTIONS, &mut moves),
                PieceKind::Queen => self.generate_sliding_moves(board, sq, piece, &QUEEN_DIRECTIONS, &mut moves),
                PieceKind::King => {
                    self.generate_step_moves(board, sq, piece, &KING_OFFSETS, &mut moves);
                    self.generate_castling_moves(board, sq, piece, &mut moves);
                }
            }
        }

        moves
    }

    /// Generate pawn moves from the given square
    fn generate_pawn_moves(&self, board: &Board, sq: Square, pawn: Piece, moves: &mut Vec<Move>) {
        let color = pawn.color;
        let direction = color.pawn_direction();
        let promo_rank = color.promotion_rank();

        let push = |moves: &mut Vec<Move>, to: Square, captured: Option<Piece>| {
            if to.rank() == promo_rank {
                for promo in PieceKind::PROMOTIONS {
                    moves.push(Move::with_promotion(sq, to, pawn, captured, promo));
                }
            } else {
                moves.push(Move::new(sq, to, pawn, captured));
            }
        };

        // Single push
        if let Some(to) = sq.offset(0, direction) {
            if board.piece_at(to).is_none() {
                push(moves, to, None);

                // Double push from starting rank
                if sq.rank() == color.pawn_start_rank() {
                    if let Some(to2) = to.offset(0, direction) {
                        if board.piece_at(to2).is_none() {
                            moves.push(Move::double_push(sq, to2, pawn));
                        }
                    }
                }
            }
        }

        // Captures
        for d_file in [-1, 1] {
            let Some(to) = sq.offset(d_file, direction) else {
                continue;
            };

            match board.piece_at(to) {
                Some(target) if target.color != color => push(moves, to, Some(target)),
                Some(_) => {}
                None => {
                    // En passant capture
                    if board.en_passant_square() == Some(to) {
                        if let Some(victim) = sq.offset(d_file, 0).and_then(|v| board.piece_at(v)) {
                            if victim == Piece::new(color.opponent(), PieceKind::Pawn) {
                                moves.push(Move::en_passant(sq, to, pawn, victim));
                            }
                        }
                    }
                }
            }
        }
    }

    /// Generate knight or king moves from a list of single-step offsets
    fn generate_step_moves(
        &self,
        board: &Board,
        sq: Square,
        piece: Piece,
        offsets: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(df, dr) in offsets {
            let Some(to) = sq.offset(df, dr) else {
                continue;
            };
            match board.piece_at(to) {
                None => moves.push(Move::new(sq, to, piece, None)),
                Some(target) if target.color != piece.color => {
                    moves.push(Move::new(sq, to, piece, Some(target)))
                }
                Some(_) => {}
            }
        }
    }

    /// Generate moves for sliding pieces (bishop, rook, queen)
    fn generate_sliding_moves(
        &self,
        board: &Board,
        sq: Square,
        piece: Piece,
        directions: &[(i8, i8)],
        moves: &mut Vec<Move>,
    ) {
        for &(df, dr) in directions {
            let mut current = sq;
            while let Some(next) = current.offset(df, dr) {
                match board.piece_at(next) {
                    None => moves.push(Move::new(sq, next, piece, None)),
                    Some(target) => {
                        if target.color != piece.color {
                            moves.push(Move::new(sq, next, piece, Some(target)));
                        }
                        break;
                    }
                }
                current = next;
            }
        }
    }

    /// Generate castling moves for the king on `sq`
    fn generate_castling_moves(&self, board: &Board, sq: Square, king: Piece, moves: &mut Vec<Move>) {
        let color = king.color;
        let enemy = color.opponent();
        let rights = board.castling_rights();
        let home = Square::new(4, color.back_rank());

        if home != Some(sq) || !(rights.kingside(color) || rights.queenside(color)) {
            return;
        }
        if board.is_square_attacked(sq, enemy) {
            return;
        }

        let rank = color.back_rank();
        let at = |file: u8| Square::new(file, rank);
        let empty = |file: u8| at(file).is_some_and(|s| board.piece_at(s).is_none());
        let safe = |file: u8| at(file).is_some_and(|s| !board.is_square_attacked(s, enemy));
        let rook_home = |kingside: bool| {
            let (rook_sq, _) = castle_rook_squares(color, kingside);
            board.piece_at(rook_sq) == Some(Piece::new(color, PieceKind::Rook))
        };

        // Kingside castling (O-O): f and g empty and unattacked
        if rights.kingside(color) && rook_home(true) && empty(5) && empty(6) && safe(5) && safe(6) {
            if let Some(to) = at(6) {
                moves.push(Move::castling(sq, to, king, true));
            }
        }

        // Queenside castling (O-O-O): b, c, d empty; only c and d must be unattacked
        if rights.queenside(color)
            && rook_home(false)
            && empty(1)
            && empty(2)
            && empty(3)
            && safe(2)
            && safe(3)
        {
            if let Some(to) = at(2) {
                moves.push(Move::castling(sq, to, king, false));
            }
        }
    }

    /// Check if a move is legal (doesn't leave own king in check)
    fn is_legal(&self, board: &mut Board, mv: &Move) -> bool {
        let mover = board.side_to_move();
        let undo = board.make_move(mv);
        let in_check = board.is_square_attacked(board.king_square(mover), mover.opponent());
        board.unmake_move(&undo);
        !in_check
    }

    /// Check if the current side's king is in check
    pub fn is_in_check(&self, board: &Board) -> bool {
        board.is_in_check()
    }

    /// Check if the current position is checkmate
    pub fn is_checkmate(&self, board: &mut Board) -> bool {
        board.is_in_check() && self.generate_legal_moves(board).is_empty()
    }

    /// Check if the current position is stalemate
    pub fn is_stalemate(&self, board: &mut Board) -> bool {
        !board.is_in_check() && self.generate_legal_moves(board).is_empty()
    }

    /// Sort captures and promotions ahead of quiet moves (MVV-LVA)
    ///
    /// The sort is stable, so equal-scored moves keep generation order and
    /// the result is deterministic.
    pub fn order_moves(&self, moves: &mut [Move]) {
        moves.sort_by_key(|mv| std::cmp::Reverse(evaluate_move(mv)));
    }
}
