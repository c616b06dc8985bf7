//! negamax_chess - Perft Module
//!
//! Leaf-node counting over the legal move tree, used to check move
//! generation against published node counts.

use crate::board::{Board, Move};
use crate::move_generator::MoveGenerator;

/// Number of leaf nodes `depth` plies below `board`
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let generator = MoveGenerator::new();
    let moves = generator.generate_legal_moves(board);

    // Bulk count at the last ply
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        let undo = board.make_move(&mv);
        nodes += perft(board, depth - 1);
        board.unmake_move(&undo);
    }
    nodes
}

/// Perft split by root move, in generation order
pub fn divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    let generator = MoveGenerator::new();
    generator
        .generate_legal_moves(board)
        .into_iter()
        .map(|mv| {
            let undo = board.make_move(&mv);
            let nodes = perft(board, depth - 1);
            board.unmake_move(&undo);
            (mv, nodes)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_position_counts() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 0), 1);
        assert_eq!(perft(&mut board, 1), 20);
        assert_eq!(perft(&mut board, 2), 400);
        assert_eq!(board, Board::new());
    }

    #[test]
    fn divide_sums_to_perft() {
        let mut board = Board::new();
        let split = divide(&mut board, 2);
        assert_eq!(split.len(), 20);
        assert!(split.iter().all(|(_, nodes)| *nodes == 20));
        assert_eq!(split.iter().map(|(_, nodes)| nodes).sum::<u64>(), 400);
    }

    #[test]
    fn divide_at_zero_is_empty() {
        assert!(divide(&mut Board::new(), 0).is_empty());
    }
}
