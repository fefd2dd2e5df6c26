use raycheck::attacks::scan_king;
use raycheck::{Color, GameState, GameStatus, PieceKind, START_FEN};

fn notations(game: &GameState) -> Vec<String> {
    let mut v: Vec<String> = game.valid_moves().iter().map(|m| m.notation()).collect();
    v.sort();
    v
}

fn sorted(list: &[&str]) -> Vec<String> {
    let mut v: Vec<String> = list.iter().map(|s| s.to_string()).collect();
    v.sort();
    v
}

#[test]
fn twenty_moves_from_start() {
    let game = GameState::from_fen(START_FEN).expect("start fen");
    assert_eq!(game.valid_moves().len(), 20);
    assert!(!game.in_check());
    assert_eq!(game.status(), GameStatus::Ongoing);
}

#[test]
fn perft_regression_starting_pos() {
    let mut game = GameState::new();
    let expected = [20u64, 400, 8902];
    for (i, &nodes) in expected.iter().enumerate() {
        let depth = i as u8 + 1;
        let got = game.perft(depth);
        assert_eq!(got, nodes, "perft mismatch at depth {}", depth);
    }
    // perft must leave the game untouched
    assert!(game.history().is_empty());
    assert_eq!(game.fen(), START_FEN);
}

#[test]
fn rook_pinned_on_rank_stays_on_axis() {
    // white rook c1 between king a1 and black rook h1
    let game = GameState::from_fen("4k3/8/8/8/8/8/8/K1R4r w - - 0 1").unwrap();
    let scan = game.scan();
    assert_eq!(scan.pins.len(), 1);
    assert_eq!(scan.pins[0].square.to_string(), "c1");

    let rook_moves: Vec<String> = notations(&game)
        .into_iter()
        .filter(|n| n.starts_with("c1"))
        .collect();
    assert_eq!(
        rook_moves,
        sorted(&["c1b1", "c1d1", "c1e1", "c1f1", "c1g1", "c1h1"])
    );
}

#[test]
fn single_check_blocked_on_one_square() {
    // rook e8 checks e1; the c1 bishop can only interpose on e3
    let game = GameState::from_fen("4r2k/8/8/8/8/8/P7/2B1K3 w - - 0 1").unwrap();
    assert!(game.in_check());
    assert_eq!(
        notations(&game),
        sorted(&["c1e3", "e1d1", "e1d2", "e1f1", "e1f2"])
    );
}

#[test]
fn single_check_resolved_by_capture() {
    let game = GameState::from_fen("R3r2k/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let moves = notations(&game);
    assert!(moves.contains(&"a8e8".to_string()));
    for n in &moves {
        assert!(n == "a8e8" || n.starts_with("e1"), "unexpected move {}", n);
    }
}

#[test]
fn knight_check_cannot_be_blocked() {
    // bishop f1 could reach e2, which would block a slider but not a knight
    let game = GameState::from_fen("7k/8/8/8/8/3n4/8/4KB2 w - - 0 1").unwrap();
    let moves = notations(&game);
    assert!(moves.iter().all(|n| n.starts_with("e1") || n.ends_with("d3")));
    assert!(moves.contains(&"f1d3".to_string()));
}

#[test]
fn double_check_allows_only_king_moves() {
    // rook e8 and knight f3 both check; the d1 queen could take f3 otherwise
    let game = GameState::from_fen("4r2k/8/8/8/8/5n2/8/3QK3 w - - 0 1").unwrap();
    let scan = game.scan();
    assert_eq!(scan.checks.len(), 2);

    let moves = game.valid_moves();
    assert!(moves.iter().all(|m| m.piece_moved.kind == PieceKind::King));
    assert_eq!(notations(&game), sorted(&["e1f1", "e1f2"]));
}

#[test]
fn back_rank_mate_has_no_moves() {
    let game = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert!(game.valid_moves().is_empty());
    assert!(game.in_check());
    assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::White });
}

#[test]
fn stalemate_has_no_moves_without_check() {
    let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(game.valid_moves().is_empty());
    assert!(!game.in_check());
    assert_eq!(game.status(), GameStatus::Stalemate);
}

#[test]
fn king_cannot_step_next_to_enemy_king() {
    let game = GameState::from_fen("8/8/8/3k4/8/3K4/8/8 w - - 0 1").unwrap();
    let moves = notations(&game);
    for banned in ["d3c4", "d3d4", "d3e4"] {
        assert!(!moves.contains(&banned.to_string()), "{} should be illegal", banned);
    }
    assert_eq!(moves.len(), 5);
}

#[test]
fn king_cannot_retreat_along_checking_ray() {
    // stepping back to f1 stays on the bishop's diagonal
    let game = GameState::from_fen("7k/8/8/1b6/8/8/4K3/8 w - - 0 1").unwrap();
    assert!(game.in_check());
    let moves = notations(&game);
    assert!(!moves.contains(&"e2f1".to_string()));
    assert!(!moves.contains(&"e2d3".to_string()));
    assert!(moves.contains(&"e2e1".to_string()));

    // rook check: moving along the file either way is still check
    let game = GameState::from_fen("4r2k/8/8/8/8/8/4K3/8 w - - 0 1").unwrap();
    let moves = notations(&game);
    assert!(!moves.contains(&"e2e1".to_string()));
    assert!(!moves.contains(&"e2e3".to_string()));
    assert!(moves.contains(&"e2d1".to_string()));
}

#[test]
fn legal_moves_never_leave_own_king_in_check() {
    let fens = [
        START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w - - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w - - 0 1",
        "4r2k/8/8/8/8/5n2/8/3QK3 w - - 0 1",
    ];
    for fen in fens {
        let mut game = GameState::from_fen(fen).unwrap();
        let mover = game.side_to_move();
        for mv in game.valid_moves() {
            game.make_move(mv);
            let scan = scan_king(game.board(), mover, game.king_square(mover));
            assert!(
                !scan.in_check(),
                "{} leaves the {:?} king in check in {}",
                mv,
                mover,
                fen
            );
            game.undo_move();
        }
    }
}
