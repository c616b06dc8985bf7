use negamax_chess::perft::{divide, perft};
use negamax_chess::Board;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

fn assert_counts(fen: &str, expected: &[u64]) {
    let mut board = Board::from_fen(fen).unwrap();
    let before = board.clone();
    for (i, nodes) in expected.iter().enumerate() {
        let depth = i as u32 + 1;
        assert_eq!(perft(&mut board, depth), *nodes, "{fen} at depth {depth}");
    }
    assert_eq!(board, before);
}

#[test]
fn perft_initial_position() {
    assert_counts(negamax_chess::STARTING_FEN, &[20, 400, 8902]);
}

#[test]
fn perft_kiwipete() {
    assert_counts(KIWIPETE, &[48, 2039]);
}

#[test]
fn perft_rook_and_pawn_endgame() {
    assert_counts(ENDGAME, &[14, 191, 2812]);
}

#[test]
fn kiwipete_divide_includes_both_castles() {
    let mut board = Board::from_fen(KIWIPETE).unwrap();
    let split = divide(&mut board, 1);
    let names: Vec<String> = split.iter().map(|(mv, _)| mv.to_uci()).collect();
    assert!(names.contains(&"e1g1".to_string()));
    assert!(names.contains(&"e1c1".to_string()));
    assert_eq!(split.len(), 48);
}
