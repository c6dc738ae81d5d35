//! App flow: key events -> solver task -> replay ticks on the tokio clock

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use mazewalk::grid::{Coordinate, Grid};
use mazewalk::replay::{ReplayPhase, ReplayTiming};
use mazewalk::solver::{Algorithm, MockSolverClient, MockSolverConfig, SolveResult};
use mazewalk::ui::{App, AppEvent};

use super::common::terminal::{buffer_contains, create_test_terminal_sized};

fn c(row: i64, col: i64) -> Coordinate {
    Coordinate::new(row, col)
}

fn key(ch: char) -> AppEvent {
    AppEvent::Input(Event::Key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)))
}

fn solver() -> Arc<MockSolverClient> {
    Arc::new(
        MockSolverClient::new().with_config(
            MockSolverConfig::default()
                .with_result(
                    Algorithm::Bfs,
                    SolveResult::new(vec![c(6, 0), c(5, 0)], vec![c(7, 0), c(6, 0)]),
                )
                .with_result(
                    Algorithm::Dfs,
                    SolveResult::new(vec![c(7, 1), c(7, 2)], vec![c(7, 0), c(7, 1), c(7, 2)])
                        .with_explanation("DFS dives deep first"),
                )
                .with_delay(Duration::from_millis(50)),
        ),
    )
}

async fn run_to_terminal(app: &mut App) {
    while !app.engine().session().phase().is_terminal() {
        assert!(app.process_next_event().await);
    }
}

#[tokio::test(start_paused = true)]
async fn test_key_press_runs_full_replay() {
    let solver = solver();
    let mut app = App::new(Grid::default_maze(), ReplayTiming::default(), solver.clone());

    app.handle_app_event(key('2'));
    run_to_terminal(&mut app).await;

    let session = app.engine().session();
    assert_eq!(session.phase(), ReplayPhase::Done);
    assert_eq!(session.algorithm(), Some(Algorithm::Dfs));
    assert_eq!(session.agent_position(), Some(c(7, 2)));
    assert_eq!(session.explanation(), Some("DFS dives deep first"));
    assert_eq!(solver.requests(), vec![Algorithm::Dfs]);
}

#[tokio::test(start_paused = true)]
async fn test_switching_algorithm_mid_request_keeps_only_latest() {
    let solver = solver();
    let mut app = App::new(Grid::default_maze(), ReplayTiming::default(), solver.clone());

    app.handle_app_event(key('b'));
    app.handle_app_event(key('d'));
    run_to_terminal(&mut app).await;

    let session = app.engine().session();
    assert_eq!(session.generation(), 2);
    assert_eq!(session.algorithm(), Some(Algorithm::Dfs));
    assert_eq!(session.revealed_expanded(), &[c(7, 1), c(7, 2)]);
    assert!(!session.is_expanded_cell(c(6, 0)));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_freezes_mid_expansion() {
    let mut app = App::new(Grid::default_maze(), ReplayTiming::default(), solver());

    app.handle_app_event(key('1'));
    // Solve answer, then the first expansion tick
    while app.engine().session().revealed_expanded().is_empty() {
        assert!(app.process_next_event().await);
    }
    app.handle_app_event(key('c'));

    let frozen = app.engine().snapshot();
    assert_eq!(frozen.phase(), ReplayPhase::Expanding);
    assert_eq!(frozen.revealed_expanded(), &[c(6, 0)]);

    // No tick ever arrives for the frozen session
    let next = tokio::time::timeout(Duration::from_secs(5), app.process_next_event()).await;
    assert!(next.is_err());
    assert_eq!(app.engine().snapshot(), frozen);
}

#[tokio::test(start_paused = true)]
async fn test_quit_event() {
    let mut app = App::new(Grid::default_maze(), ReplayTiming::default(), solver());
    app.event_sender().send(AppEvent::Quit).unwrap();
    assert!(app.process_next_event().await);
    assert!(app.should_quit());
}

#[tokio::test(start_paused = true)]
async fn test_full_screen_draw_after_replay() {
    let mut app = App::new(Grid::default_maze(), ReplayTiming::default(), solver());
    app.handle_app_event(key('d'));
    run_to_terminal(&mut app).await;

    let mut terminal = create_test_terminal_sized(100, 16);
    terminal.draw(|f| app.draw(f)).unwrap();
    let buffer = terminal.backend().buffer();

    assert!(buffer_contains(buffer, "Solution (DFS)"));
    assert!(buffer_contains(buffer, "DFS dives deep first"));
    assert!(buffer_contains(buffer, "done"));
    assert!(buffer_contains(buffer, "expanded 2/2"));
}
