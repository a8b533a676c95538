//! Tests for turn sequencing, win/draw detection and restarts.

use noughts::{
    Board, BoardError, BoardSnapshot, Cell, EngineConfig, GameController, GameEvent, GameResult,
    GameStatus, ManualScheduler, Mark, MoveError, Outcome, Phase, PlayerSpec, Scoreboard,
    evaluate,
};

fn controller() -> (GameController<ManualScheduler>, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let game = GameController::new(EngineConfig::default(), scheduler.clone());
    (game, scheduler)
}

fn started() -> GameController<ManualScheduler> {
    let (mut game, _) = controller();
    game.start_game(vec![PlayerSpec::human("Alice"), PlayerSpec::human("Bob")])
        .expect("two players");
    game
}

#[test]
fn test_board_rejects_out_of_range() {
    let mut board = Board::new();
    for index in 9..30 {
        assert_eq!(
            board.place(index, Mark::X),
            Err(BoardError::IndexOutOfRange { index })
        );
    }
    assert_eq!(board, Board::new());
}

#[test]
fn test_board_rejects_repeat_placement() {
    let mut board = Board::new();
    for index in 0..9 {
        board.place(index, Mark::for_seat(index)).unwrap();
    }
    let full = board.clone();
    for index in 0..9 {
        assert_ne!(board.cell_at(index), Ok(Cell::Empty));
        assert_eq!(
            board.place(index, Mark::O),
            Err(BoardError::CellOccupied { index })
        );
    }
    assert_eq!(board, full);
}

#[test]
fn test_turn_alternates() {
    let mut game = started();
    // No line completes before the board fills.
    let moves = [0, 1, 2, 4, 3, 5, 7, 6];
    for (n, &index) in moves.iter().enumerate() {
        assert_eq!(game.current_player_index(), Some(n % 2));
        let expected = Mark::for_seat(n);
        assert_eq!(game.current_player().map(|p| *p.marker()), Some(expected));
        assert!(game.submit_move(index));
        assert_eq!(game.current_player_index(), Some((n + 1) % 2));
        assert_eq!(game.status(), Some(GameStatus::InProgress));
    }
}

#[test]
fn test_win_precedence_over_full_board() {
    let mut board = Board::new();
    for (index, mark) in [(0, Mark::X), (1, Mark::X), (2, Mark::X), (3, Mark::O), (4, Mark::O)] {
        board.place(index, mark).unwrap();
    }
    assert_eq!(evaluate(&board.snapshot()), Outcome::Win(Mark::X));
}

#[test]
fn test_draw_sequence() {
    let mut game = started();
    for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        assert!(game.submit_move(index), "move {index} rejected");
    }
    assert_eq!(game.status(), Some(GameStatus::Draw));
    assert_eq!(game.phase(), Phase::Finished(GameResult::Draw));
    assert!(game.snapshot().is_full());
    assert_eq!(evaluate(&game.snapshot()), Outcome::Draw);
}

#[test]
fn test_top_row_win_stops_play() {
    let mut game = started();
    for index in [0, 3, 1, 4] {
        assert!(game.submit_move(index));
    }
    assert_eq!(game.status(), Some(GameStatus::InProgress));
    assert!(game.submit_move(2));
    assert_eq!(game.status(), Some(GameStatus::Won(Mark::X)));
    assert_eq!(
        game.result(),
        Some(GameResult::Win {
            marker: Mark::X,
            winner: "Alice".to_string(),
        })
    );

    let frozen = game.snapshot();
    for index in 0..12 {
        assert!(!game.submit_move(index));
        assert_eq!(game.try_submit_move(index), Err(MoveError::GameNotInProgress));
    }
    assert_eq!(game.snapshot(), frozen);
    assert_eq!(game.history().len(), 5);
}

#[test]
fn test_winning_last_move_is_not_a_draw() {
    let mut game = started();
    // X O X / O X O / O X X  - X completes the 0-4-8 diagonal on the ninth move.
    for index in [0, 1, 2, 3, 4, 5, 7, 6, 8] {
        assert!(game.submit_move(index));
    }
    assert!(game.snapshot().is_full());
    assert_eq!(game.status(), Some(GameStatus::Won(Mark::X)));
}

#[test]
fn test_play_again_keeps_players_and_score() {
    let mut game = started();
    for index in [0, 3, 1, 4, 2] {
        game.submit_move(index);
    }
    game.play_again().unwrap();

    assert_eq!(game.phase(), Phase::InProgress);
    assert_eq!(game.snapshot(), BoardSnapshot::default());
    assert!(game.history().is_empty());
    assert_eq!(game.current_player_index(), Some(0));
    let names: Vec<_> = game
        .state()
        .unwrap()
        .players()
        .iter()
        .map(|p| p.display_name().clone())
        .collect();
    assert_eq!(names, ["Alice", "Bob"]);
    assert_eq!(game.scoreboard(), Scoreboard { x_wins: 1, o_wins: 0, draws: 0 });
    assert!(game.submit_move(4));
}

#[test]
fn test_reset_returns_to_setup() {
    let mut game = started();
    let mut events = game.subscribe();
    game.submit_move(0);
    game.reset_game();

    assert_eq!(game.phase(), Phase::Setup);
    assert_eq!(game.status(), None);
    assert_eq!(game.snapshot(), BoardSnapshot::default());
    assert_eq!(game.scoreboard(), Scoreboard::default());
    assert!(!game.submit_move(4));

    assert!(matches!(events.try_recv(), Ok(GameEvent::MovePlayed { .. })));
    assert_eq!(events.try_recv(), Ok(GameEvent::Reset));
}

#[test]
fn test_failed_start_keeps_running_game() {
    let mut game = started();
    game.submit_move(4);
    assert!(game.start_game(vec![PlayerSpec::human("Solo")]).is_err());
    assert_eq!(game.history().len(), 1);
    assert_eq!(game.phase(), Phase::InProgress);
}
