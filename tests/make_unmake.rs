use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use negamax_chess::{Board, Color, MoveGenerator, MoveKind, PieceKind, Square};

const START_FENS: &[&str] = &[
    negamax_chess::STARTING_FEN,
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
];

fn square(name: &str) -> Square {
    name.parse().unwrap()
}

/// Every legal move of every visited position must undo cleanly and keep
/// the mover's king safe.
#[test]
fn random_walks_restore_every_position() {
    let generator = MoveGenerator::new();

    for (seed, fen) in START_FENS.iter().enumerate() {
        let mut rng = StdRng::seed_from_u64(seed as u64);
        let mut board = Board::from_fen(fen).unwrap();
        let mut history = Vec::new();

        for _ in 0..80 {
            let moves = generator.generate_legal_moves(&mut board);
            if moves.is_empty() {
                break;
            }

            for mv in &moves {
                let before = board.clone();
                let mover = board.side_to_move();
                let undo = board.make_move(mv);
                assert!(
                    !board.is_square_attacked(board.king_square(mover), mover.opponent()),
                    "{mv} leaves the king attacked in {}",
                    before.to_fen()
                );
                board.unmake_move(&undo);
                assert_eq!(board, before, "{mv} did not undo in {}", before.to_fen());
            }

            let mv = moves[rng.gen_range(0..moves.len())];
            history.push((board.clone(), board.make_move(&mv)));
        }

        // unwind the whole walk
        while let Some((before, undo)) = history.pop() {
            board.unmake_move(&undo);
            assert_eq!(board, before);
        }
        assert_eq!(board.to_fen(), *fen);
    }
}

#[test]
fn en_passant_removes_the_pushed_pawn() {
    let mut board =
        Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3").unwrap();
    let moves = MoveGenerator::new().generate_legal_moves(&mut board);
    let ep = moves
        .iter()
        .find(|mv| mv.kind == MoveKind::EnPassant)
        .copied()
        .unwrap();
    assert_eq!(ep.to_uci(), "e5f6");

    let undo = board.make_move(&ep);
    assert_eq!(board.piece_at(square("f5")), None);
    assert_eq!(board.piece_at(square("f6")).unwrap().kind, PieceKind::Pawn);
    assert_eq!(board.piece_at(square("f6")).unwrap().color, Color::White);
    assert_eq!(board.piece_at(square("d5")).unwrap().kind, PieceKind::Pawn);

    board.unmake_move(&undo);
    assert_eq!(board.piece_at(square("f5")).unwrap().color, Color::Black);
    assert_eq!(board.piece_at(square("f6")), None);
}

#[test]
fn castling_rights_follow_king_and_rook_moves() {
    let generator = MoveGenerator::new();
    let castles = |board: &mut Board| -> Vec<String> {
        generator
            .generate_legal_moves(board)
            .into_iter()
            .filter(|mv| mv.is_castling())
            .map(|mv| mv.to_uci())
            .collect()
    };

    let mut board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    assert_eq!(castles(&mut board).len(), 2);

    // rook h1 out and back: kingside right is gone for good
    for uci in ["h1h2", "a8a7", "h2h1", "a7a8"] {
        let mv = generator
            .generate_legal_moves(&mut board)
            .into_iter()
            .find(|mv| mv.to_uci() == uci)
            .unwrap();
        board.make_move(&mv);
    }
    assert_eq!(castles(&mut board), vec!["e1c1".to_string()]);
    assert_eq!(board.castling_rights().to_string(), "Qk");

    // king steps out and back: no castling at all for white
    for uci in ["e1f1", "e8f8", "f1e1", "f8e8"] {
        let mv = generator
            .generate_legal_moves(&mut board)
            .into_iter()
            .find(|mv| mv.to_uci() == uci)
            .unwrap();
        board.make_move(&mv);
    }
    assert!(castles(&mut board).is_empty());
    assert!(board.castling_rights().is_empty());
}

#[test]
fn castling_is_refused_through_attacked_squares() {
    // black rook on f8 covers f1
    let mut board = Board::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let names: Vec<String> = MoveGenerator::new()
        .generate_legal_moves(&mut board)
        .into_iter()
        .filter(|mv| mv.is_castling())
        .map(|mv| mv.to_uci())
        .collect();
    assert_eq!(names, vec!["e1c1".to_string()]);
}
