//! FEN import and export
//!
//! `Board::from_fen` validates every field and either returns a complete
//! board or a `ChessError::InvalidPosition`; it never hands back a partially
//! filled position.

use std::str::FromStr;

use log::debug;

use crate::board::Board;
use crate::error::{ChessError, PositionError, Result};
use crate::types::*;

impl Board {
    /// Create a board from a FEN string
    pub fn from_fen(fen: &str) -> Result<Self> {
        parse_fen(fen).map_err(|reason| ChessError::InvalidPosition {
            fen: fen.to_string(),
            reason,
        })
    }

    /// Generate FEN string from current board state
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        // Piece placement
        for rank in (0..8u8).rev() {
            let mut empty_count = 0;
            for file in 0..8u8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    None => empty_count += 1,
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        fen.push(piece_to_fen(piece));
                    }
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move() {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        fen.push_str(&self.castling_rights().to_string());

        fen.push(' ');
        match self.en_passant_square() {
            Some(sq) => fen.push_str(&sq.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(" {} {}", self.halfmove_clock(), self.fullmove_number()));

        fen
    }
}

impl FromStr for Board {
    type Err = ChessError;

    fn from_str(fen: &str) -> Result<Self> {
        Board::from_fen(fen)
    }
}

fn parse_fen(fen: &str) -> std::result::Result<Board, PositionError> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    let [placement, active, castling, en_passant, halfmove, fullmove] = parts[..] else {
        return Err(PositionError::FieldCount(parts.len()));
    };

    let mut board = Board::empty();
    parse_placement(&mut board, placement)?;

    let side = match active {
        "w" => Color::White,
        "b" => Color::Black,
        _ => return Err(PositionError::InvalidSideToMove(active.to_string())),
    };
    board.set_side_to_move(side);

    // the side that just moved cannot have left its king attacked
    let waiting = side.opponent();
    if board.is_square_attacked(board.king_square(waiting), side) {
        return Err(PositionError::OpponentInCheck(waiting));
    }

    let rights = parse_castling(castling)?;
    board.set_castling_rights(sanitize_castling(&board, rights));

    board.set_en_passant_square(parse_en_passant(en_passant, side)?);

    let halfmove_clock = halfmove
        .parse::<u32>()
        .map_err(|_| PositionError::InvalidHalfmoveClock(halfmove.to_string()))?;
    let fullmove_number = fullmove
        .parse::<u32>()
        .ok()
        .filter(|&n| n >= 1)
        .ok_or_else(|| PositionError::InvalidFullmoveNumber(fullmove.to_string()))?;
    board.set_clocks(halfmove_clock, fullmove_number);

    Ok(board)
}

/// Fill the board from the placement field and check king and pawn sanity
fn parse_placement(board: &mut Board, placement: &str) -> std::result::Result<(), PositionError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(PositionError::RankCount(ranks.len()));
    }

    let mut king_counts = [0usize; 2];

    // FEN lists rank 8 first
    for (row, text) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(PositionError::RankWidth { rank: rank + 1 });
                }
                file += skip as u8;
                if file > 8 {
                    return Err(PositionError::RankWidth { rank: rank + 1 });
                }
                continue;
            }

            let piece = fen_to_piece(c).ok_or(PositionError::InvalidPiece(c))?;
            let sq = Square::new(file, rank).ok_or(PositionError::RankWidth { rank: rank + 1 })?;
            if piece.kind == PieceKind::Pawn && (rank == 0 || rank == 7) {
                return Err(PositionError::PawnOnBackRank(sq.to_string()));
            }
            if piece.kind == PieceKind::King {
                king_counts[piece.color.index()] += 1;
            }
            board.set_piece(sq, Some(piece));
            file += 1;
        }
        if file != 8 {
            return Err(PositionError::RankWidth { rank: rank + 1 });
        }
    }

    for color in [Color::White, Color::Black] {
        match king_counts[color.index()] {
            0 => return Err(PositionError::MissingKing(color)),
            1 => {}
            _ => return Err(PositionError::DuplicateKing(color)),
        }
    }

    Ok(())
}

fn parse_castling(field: &str) -> std::result::Result<CastlingRights, PositionError> {
    let invalid = || PositionError::InvalidCastling(field.to_string());
    if field == "-" {
        return Ok(CastlingRights::NONE);
    }
    if field.is_empty() {
        return Err(invalid());
    }

    let mut rights = CastlingRights::NONE;
    for c in field.chars() {
        let flag = match c {
            'K' => &mut rights.white_kingside,
            'Q' => &mut rights.white_queenside,
            'k' => &mut rights.black_kingside,
            'q' => &mut rights.black_queenside,
            _ => return Err(invalid()),
        };
        // repeated letters are malformed
        if *flag {
            return Err(invalid());
        }
        *flag = true;
    }
    Ok(rights)
}

/// Drop rights whose king or rook is not on its home square
fn sanitize_castling(board: &Board, rights: CastlingRights) -> CastlingRights {
    let has = |sq: Square, color: Color, kind: PieceKind| board.piece_at(sq) == Some(Piece::new(color, kind));

    let mut kept = rights;
    for (color, king_home) in [(Color::White, Square::E1), (Color::Black, Square::E8)] {
        if !has(king_home, color, PieceKind::King) {
            kept.clear_color(color);
        }
    }
    for corner in [Square::A1, Square::H1, Square::A8, Square::H8] {
        let color = if corner.rank() == 0 { Color::White } else { Color::Black };
        if !has(corner, color, PieceKind::Rook) {
            kept.clear_corner(corner);
        }
    }

    if kept != rights {
        debug!("dropping castling rights {rights} -> {kept}: pieces are not on their home squares");
    }
    kept
}

fn parse_en_passant(field: &str, side: Color) -> std::result::Result<Option<Square>, PositionError> {
    if field == "-" {
        return Ok(None);
    }
    let sq: Square = field
        .parse()
        .map_err(|_| PositionError::InvalidEnPassant(field.to_string()))?;
    // the target sits behind a pawn that just moved two squares
    let expected_rank = match side {
        Color::White => 5,
        Color::Black => 2,
    };
    if sq.rank() != expected_rank {
        return Err(PositionError::InvalidEnPassant(field.to_string()));
    }
    Ok(Some(sq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::STARTING_FEN;

    #[test]
    fn starting_fen_matches_new_board() {
        let board = Board::from_fen(STARTING_FEN).unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(board.to_fen(), STARTING_FEN);
    }

    #[test]
    fn fen_loading_valid() {
        let fen = "rnbqkbnr/pp1ppppp/8/2p5/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2";
        let board: Board = fen.parse().unwrap();
        assert_eq!(
            board.piece_at("e4".parse().unwrap()),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(board.piece_at("f6".parse().unwrap()), None);
        assert_eq!(board.side_to_move(), Color::Black);
        assert_eq!(board.castling_rights(), CastlingRights::ALL);
        assert_eq!(board.en_passant_square(), None);
        assert_eq!(board.halfmove_clock(), 1);
        assert_eq!(board.fullmove_number(), 2);
        assert_eq!(board.to_fen(), fen);
    }

    #[test]
    fn fen_loading_with_en_passant() {
        let board =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1").unwrap();
        assert_eq!(board.en_passant_square(), Some("e3".parse().unwrap()));
    }

    #[test]
    fn fen_loading_invalid() {
        let cases: &[(&str, fn(&PositionError) -> bool)] = &[
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0", |e| {
                matches!(e, PositionError::FieldCount(5))
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1", |e| {
                matches!(e, PositionError::RankCount(7))
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1", |e| {
                matches!(e, PositionError::InvalidSideToMove(_))
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Z - 0 1", |e| {
                matches!(e, PositionError::InvalidCastling(_))
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KKq - 0 1", |e| {
                matches!(e, PositionError::InvalidCastling(_))
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1", |e| {
                matches!(e, PositionError::InvalidEnPassant(_))
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1", |e| {
                matches!(e, PositionError::InvalidEnPassant(_))
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1", |e| {
                matches!(e, PositionError::InvalidHalfmoveClock(_))
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 y", |e| {
                matches!(e, PositionError::InvalidFullmoveNumber(_))
            }),
            ("rnbqkbnr/pppppppz/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", |e| {
                matches!(e, PositionError::InvalidPiece('z'))
            }),
            ("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", |e| {
                matches!(e, PositionError::RankWidth { rank: 7 })
            }),
            ("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", |e| {
                matches!(e, PositionError::RankWidth { rank: 7 })
            }),
            ("rnbq1bnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQ - 0 1", |e| {
                matches!(e, PositionError::MissingKing(Color::Black))
            }),
            ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBKKBNR w kq - 0 1", |e| {
                matches!(e, PositionError::DuplicateKing(Color::White))
            }),
            ("4k2P/8/8/8/8/8/8/4K3 w - - 0 1", |e| {
                matches!(e, PositionError::PawnOnBackRank(_))
            }),
            ("4k3/8/8/8/8/8/8/4R1K1 w - - 0 1", |e| {
                matches!(e, PositionError::OpponentInCheck(Color::Black))
            }),
            ("4k3/8/8/8/8/8/8/4K2r b - - 0 1", |e| {
                matches!(e, PositionError::OpponentInCheck(Color::White))
            }),
        ];

        for (fen, check) in cases {
            match Board::from_fen(fen) {
                Err(ChessError::InvalidPosition { reason, .. }) => {
                    assert!(check(&reason), "unexpected reason {reason:?} for {fen}")
                }
                other => panic!("FEN should be invalid: {fen}, got {other:?}"),
            }
        }
    }

    #[test]
    fn castling_rights_without_pieces_are_dropped() {
        // white king has left e1, black h8 rook is missing
        let board = Board::from_fen("r3k3/8/8/8/8/8/8/R4K1R w KQkq - 0 1").unwrap();
        let rights = board.castling_rights();
        assert!(!rights.white_kingside);
        assert!(!rights.white_queenside);
        assert!(!rights.black_kingside);
        assert!(rights.black_queenside);
        assert_eq!(board.to_fen(), "r3k3/8/8/8/8/8/8/R4K1R w q - 0 1");
    }

    #[test]
    fn king_squares_come_from_placement() {
        let board = Board::from_fen("8/8/8/3k4/8/8/8/6K1 b - - 3 40").unwrap();
        assert_eq!(board.king_square(Color::White), Square::G1);
        assert_eq!(board.king_square(Color::Black), "d5".parse().unwrap());
    }
}
