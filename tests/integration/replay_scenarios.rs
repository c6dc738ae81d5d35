//! End-to-end replay scenarios against the virtual clock
//!
//! Flow: SolverClient -> ReplayEngine -> emitted snapshots

use std::time::Duration;

use mazewalk::grid::{Coordinate, Grid};
use mazewalk::replay::{ReplayEngine, ReplayPhase, ReplaySnapshot, ReplayTiming, VirtualScheduler};
use mazewalk::solver::{Algorithm, MockSolverClient, MockSolverConfig, SolveResult, SolverClient, SolverError};
use tokio::sync::mpsc::UnboundedReceiver;

fn c(row: i64, col: i64) -> Coordinate {
    Coordinate::new(row, col)
}

fn engine() -> ReplayEngine<VirtualScheduler> {
    ReplayEngine::new(
        Grid::default_maze(),
        ReplayTiming::default(),
        VirtualScheduler::new(),
    )
}

fn drain(rx: &mut UnboundedReceiver<ReplaySnapshot>) -> Vec<ReplaySnapshot> {
    let mut out = Vec::new();
    while let Ok(snapshot) = rx.try_recv() {
        out.push(snapshot);
    }
    out
}

/// Distinct consecutive phases seen in a snapshot stream
fn phase_trail(snapshots: &[ReplaySnapshot]) -> Vec<ReplayPhase> {
    let mut trail: Vec<ReplayPhase> = Vec::new();
    for snapshot in snapshots {
        if trail.last() != Some(&snapshot.phase()) {
            trail.push(snapshot.phase());
        }
    }
    trail
}

/// Run one replay to completion with a mock solver answer
async fn replay(
    engine: &mut ReplayEngine<VirtualScheduler>,
    solver: &MockSolverClient,
    algorithm: Algorithm,
) {
    let ticket = engine.start_replay(algorithm);
    let result = solver.solve(algorithm).await;
    let _ = engine.on_solve_result(ticket, result);
    engine.run_until_settled();
}

#[tokio::test]
async fn test_two_cell_replay_ends_on_last_cell() {
    let solver = MockSolverClient::new().with_config(MockSolverConfig::default().with_result(
        Algorithm::Bfs,
        SolveResult::new(vec![c(0, 0), c(0, 1)], vec![c(0, 0), c(0, 1)]),
    ));
    let mut engine = engine();
    let mut rx = engine.subscribe();

    replay(&mut engine, &solver, Algorithm::Bfs).await;

    let session = engine.session();
    assert_eq!(session.revealed_expanded(), &[c(0, 0), c(0, 1)]);
    assert_eq!(session.revealed_path(), &[c(0, 0), c(0, 1)]);
    assert_eq!(session.agent_position(), Some(c(0, 1)));
    assert_eq!(session.phase(), ReplayPhase::Done);

    let snapshots = drain(&mut rx);
    assert_eq!(
        phase_trail(&snapshots),
        vec![
            ReplayPhase::Idle,
            ReplayPhase::Expanding,
            ReplayPhase::PathRevealed,
            ReplayPhase::Traversing,
            ReplayPhase::Done,
        ]
    );
}

#[tokio::test]
async fn test_empty_result_never_places_agent() {
    let solver = MockSolverClient::new().with_config(
        MockSolverConfig::default().with_result(Algorithm::Dfs, SolveResult::default()),
    );
    let mut engine = engine();
    let mut rx = engine.subscribe();

    replay(&mut engine, &solver, Algorithm::Dfs).await;

    let snapshots = drain(&mut rx);
    assert_eq!(
        phase_trail(&snapshots),
        vec![
            ReplayPhase::Idle,
            ReplayPhase::Expanding,
            ReplayPhase::PathRevealed,
            ReplayPhase::Done,
        ]
    );
    assert!(snapshots.iter().all(|s| s.agent_position().is_none()));
    assert!(snapshots.iter().all(|s| s.revealed_expanded().is_empty()));
    assert!(snapshots.iter().all(|s| s.revealed_path().is_empty()));
}

#[tokio::test]
async fn test_restart_before_first_tick_shows_only_new_session() {
    let bfs = SolveResult::new(vec![c(6, 0), c(5, 0)], vec![c(7, 0), c(6, 0)]);
    let dfs = SolveResult::new(vec![c(7, 1), c(7, 2)], vec![c(7, 0), c(7, 1), c(7, 2)]);
    let solver = MockSolverClient::new().with_config(
        MockSolverConfig::default()
            .with_result(Algorithm::Bfs, bfs.clone())
            .with_result(Algorithm::Dfs, dfs),
    );
    let mut engine = engine();

    let bfs_ticket = engine.start_replay(Algorithm::Bfs);
    let dfs_ticket = engine.start_replay(Algorithm::Dfs);
    let mut rx = engine.subscribe();

    // The bfs answer arriving late must not leak into the dfs session
    let bfs_answer = solver.solve(Algorithm::Bfs).await;
    engine.on_solve_result(bfs_ticket, bfs_answer).unwrap();
    let dfs_answer = solver.solve(Algorithm::Dfs).await;
    engine.on_solve_result(dfs_ticket, dfs_answer).unwrap();
    engine.run_until_settled();

    let snapshots = drain(&mut rx);
    assert!(!snapshots.is_empty());
    for snapshot in &snapshots {
        assert_eq!(snapshot.algorithm(), Some(Algorithm::Dfs));
        assert!(snapshot
            .revealed_expanded()
            .iter()
            .all(|coord| !bfs.expanded_nodes.contains(coord)));
    }
    assert_eq!(engine.session().revealed_expanded(), &[c(7, 1), c(7, 2)]);
    assert_eq!(engine.session().phase(), ReplayPhase::Done);
}

#[tokio::test]
async fn test_restart_mid_replay_leaves_old_snapshot_untouched() {
    let result = SolveResult::new(
        vec![c(7, 0), c(7, 1), c(7, 2), c(7, 3)],
        vec![c(7, 0), c(7, 1), c(7, 2), c(7, 3)],
    );
    let solver = MockSolverClient::new().with_config(
        MockSolverConfig::default()
            .with_result(Algorithm::Bfs, result.clone())
            .with_result(Algorithm::AStar, result),
    );
    let mut engine = engine();

    let ticket = engine.start_replay(Algorithm::Bfs);
    engine
        .on_solve_result(ticket, solver.solve(Algorithm::Bfs).await)
        .unwrap();
    engine.advance(Duration::from_millis(250));
    let captured = engine.snapshot();
    assert_eq!(captured.revealed_expanded().len(), 2);

    replay(&mut engine, &solver, Algorithm::AStar).await;

    assert_eq!(captured.revealed_expanded().len(), 2);
    assert_eq!(captured.phase(), ReplayPhase::Expanding);
    assert_eq!(engine.session().generation(), captured.generation() + 1);
    assert_eq!(engine.session().revealed_expanded().len(), 4);
}

#[tokio::test]
async fn test_out_of_bounds_coordinate_is_excluded() {
    let solver = MockSolverClient::new().with_config(MockSolverConfig::default().with_result(
        Algorithm::AStar,
        SolveResult::new(
            vec![c(7, 0), c(99, 99), c(7, 1)],
            vec![c(7, 0), c(7, 1), c(99, 99)],
        ),
    ));
    let mut engine = engine();
    let mut rx = engine.subscribe();

    replay(&mut engine, &solver, Algorithm::AStar).await;

    let session = engine.session();
    assert_eq!(session.phase(), ReplayPhase::Done);
    assert_eq!(session.skipped_coordinates(), 2);
    assert_eq!(session.revealed_expanded(), &[c(7, 0), c(7, 1)]);
    assert_eq!(session.revealed_path(), &[c(7, 0), c(7, 1)]);

    for snapshot in drain(&mut rx) {
        assert!(!snapshot.is_expanded_cell(c(99, 99)));
        assert!(!snapshot.is_path_cell(c(99, 99)));
        assert_ne!(snapshot.agent_position(), Some(c(99, 99)));
    }
}

#[tokio::test]
async fn test_failure_stops_at_idle() {
    let solver = MockSolverClient::new().with_config(
        MockSolverConfig::default()
            .with_error(Algorithm::Bfs, SolverError::Timeout(10_000)),
    );
    let mut engine = engine();
    let mut rx = engine.subscribe();

    let ticket = engine.start_replay(Algorithm::Bfs);
    let err = engine
        .on_solve_result(ticket, solver.solve(Algorithm::Bfs).await)
        .unwrap_err();
    assert!(err.to_string().contains("timed out"));
    assert_eq!(engine.run_until_settled(), 0);

    let snapshots = drain(&mut rx);
    assert_eq!(
        phase_trail(&snapshots),
        vec![ReplayPhase::Idle, ReplayPhase::Failed]
    );
    assert!(engine.session().explanation().is_none());
}
