use autosweep_core::*;

#[test]
fn agent_finishes_500_seeded_beginner_boards() {
    let config = configure(9, 9, 10).unwrap();
    let tile_count = usize::from(config.total_tiles());
    let mut wins = 0;

    for seed in 0..500 {
        let mut session = Session::seeded(config, seed);
        assert!(session.start_agent());

        let steps = session.run_agent(tile_count + 1).unwrap();
        let snapshot = session.snapshot();

        assert!(
            snapshot.state.is_finished(),
            "seed {seed} still {:?} after {steps} steps",
            snapshot.state
        );
        assert!(steps <= tile_count, "seed {seed} took {steps} steps");
        if snapshot.state == GameState::Win {
            wins += 1;
            let board = snapshot.board;
            assert_eq!(board.hidden_or_flagged(), board.mine_total());
        } else {
            assert!(snapshot.board.triggered_mine().is_some());
        }
    }

    // single-clue deduction clears most beginner boards
    assert!(wins > 150, "only {wins} wins out of 500");
}

#[test]
fn center_first_click_opens_at_least_its_neighbors() {
    let config = configure(9, 9, 10).unwrap();

    for seed in 0..50 {
        let mut session = Session::seeded(config, seed);
        let (snapshot, outcome) = session.click(40).unwrap();

        assert!(outcome.has_update());
        assert_eq!(snapshot.board[40].view(), TileView::Open(0));
        let around: Vec<_> = snapshot.board.neighbors(40).collect();
        assert_eq!(around.len(), 8);
        for index in around {
            assert!(matches!(snapshot.board[index].view(), TileView::Open(_)));
        }
    }
}

#[test]
fn win_arrives_with_the_last_safe_tile() {
    let config = configure(9, 9, 10).unwrap();
    let mut session = Session::seeded(config, 11);
    session.click(40).unwrap();

    let board = session.snapshot().board.clone();
    let mut safe_hidden: Vec<_> = board
        .iter()
        .filter(|(_, tile)| !tile.is_mine() && tile.state() == TileState::Hidden)
        .map(|(index, _)| index)
        .collect();

    while let Some(index) = safe_hidden.pop() {
        let (snapshot, outcome) = session.click(index).unwrap();
        let remaining = snapshot.board.hidden_or_flagged();
        if remaining == 10 {
            assert_eq!(snapshot.state, GameState::Win);
            assert_eq!(snapshot.board.open_count(), 71);
            break;
        }
        assert_eq!(snapshot.state, GameState::Playing);
        assert_ne!(outcome.outcome, RevealOutcome::Won);
    }
    assert_eq!(session.snapshot().state, GameState::Win);
}

#[test]
fn losing_reveals_every_mine() {
    // mines on the even columns of rows 0 and 2
    let mines = [0, 2, 4, 6, 8, 18, 20, 22, 24, 26];
    let config = configure(9, 9, 10).unwrap();
    let mut session = Session::new(
        GameController::new(config, FixedMineGenerator::new(mines)),
        SolverAgent::seeded(0),
    );
    let (_, delta) = session.click(1).unwrap();
    assert_eq!(delta.outcome, RevealOutcome::Revealed);
    assert_eq!(delta.opened, 1);

    let (snapshot, delta) = session.click(0).unwrap();

    assert_eq!(delta.outcome, RevealOutcome::HitMine);
    assert_eq!(delta.opened, 10);
    assert_eq!(snapshot.state, GameState::Lose);
    assert_eq!(snapshot.board.triggered_mine(), Some(0));
    let revealed = snapshot
        .board
        .views()
        .filter(|&view| view == TileView::Mine)
        .count();
    assert_eq!(revealed, 10);
}
