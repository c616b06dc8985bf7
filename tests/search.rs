use negamax_chess::search::{is_mate_score, MATE_SCORE};
use negamax_chess::{Board, MoveGenerator, SearchEngine, Terminal};

#[test]
fn back_rank_mate_is_found() {
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 w - - 0 1").unwrap();
    let result = SearchEngine::new().find_best_move(&mut board, 2);
    assert_eq!(result.best_move.unwrap().to_uci(), "d1d8");
    assert_eq!(result.score, MATE_SCORE - 1);
}

#[test]
fn defender_sees_the_mate_coming() {
    // black to move, any move allows Rd8#
    let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/5PPP/3R2K1 b - - 0 1").unwrap();
    let result = SearchEngine::new().find_best_move(&mut board, 2);
    assert!(result.best_move.is_some());
    // h6, g6, f6 or Kf8 give the king air; only a blunder allows mate
    assert!(!is_mate_score(result.score), "score {}", result.score);
}

#[test]
fn stalemated_side_gets_a_draw_verdict() {
    let mut board = Board::from_fen("7k/5Q2/8/8/8/8/8/K7 b - - 0 1").unwrap();
    let result = SearchEngine::new().find_best_move(&mut board, 4);
    assert_eq!(result.terminal, Some(Terminal::Stalemate));
    assert_eq!(result.best_move, None);
    assert_eq!(result.score, 0);
    assert_eq!(result.nodes, 0);
}

#[test]
fn best_move_is_always_legal() {
    let fens = [
        negamax_chess::STARTING_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    ];
    for fen in fens {
        let mut board = Board::from_fen(fen).unwrap();
        let result = SearchEngine::new().find_best_move(&mut board, 2);
        let mv = result.best_move.unwrap();
        let legal = MoveGenerator::new().generate_legal_moves(&mut board);
        assert!(legal.contains(&mv), "{mv} is not legal in {fen}");
        assert_eq!(board.to_fen(), fen);
    }
}
