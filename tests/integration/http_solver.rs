//! HttpSolverClient against a local fake solver service

use std::time::Duration;

use mazewalk::grid::{Coordinate, Grid};
use mazewalk::replay::{ReplayEngine, ReplayPhase, ReplayTiming, VirtualScheduler};
use mazewalk::solver::{Algorithm, HttpSolverClient, SolverClient, SolverError};
use serde_json::json;

use super::common::fake_solver::{FakeSolver, Reply};

fn c(row: i64, col: i64) -> Coordinate {
    Coordinate::new(row, col)
}

fn client(base_url: &str) -> HttpSolverClient {
    HttpSolverClient::new(base_url, Duration::from_secs(5)).expect("build client")
}

#[tokio::test]
async fn test_decodes_solver_response() {
    let url = FakeSolver::new()
        .json(
            "bfs",
            json!({
                "expanded_nodes": [[7, 0], [6, 0], [7, 1]],
                "path": [[7, 0], [7, 1]],
                "explanation": "BFS explores level by level"
            }),
        )
        .spawn()
        .await;

    let result = client(&url).solve(Algorithm::Bfs).await.unwrap();
    assert_eq!(result.expanded_nodes, vec![c(7, 0), c(6, 0), c(7, 1)]);
    assert_eq!(result.path, vec![c(7, 0), c(7, 1)]);
    assert_eq!(result.explanation, "BFS explores level by level");
}

#[tokio::test]
async fn test_null_path_and_missing_explanation() {
    let url = FakeSolver::new()
        .json("dfs", json!({ "expanded_nodes": [[7, 0]], "path": null }))
        .spawn()
        .await;

    let result = client(&url).solve(Algorithm::Dfs).await.unwrap();
    assert_eq!(result.expanded_nodes, vec![c(7, 0)]);
    assert!(result.path.is_empty());
    assert!(result.explanation.is_empty());
}

#[tokio::test]
async fn test_a_star_route_name() {
    let url = FakeSolver::new()
        .json("a_star", json!({ "expanded_nodes": [], "path": [] }))
        .spawn()
        .await;

    let result = client(&url).solve(Algorithm::AStar).await.unwrap();
    assert!(result.expanded_nodes.is_empty());
}

#[tokio::test]
async fn test_server_error_is_status() {
    let url = FakeSolver::new()
        .reply("bfs", Reply::Status(500))
        .spawn()
        .await;

    let err = client(&url).solve(Algorithm::Bfs).await.unwrap_err();
    assert_eq!(err, SolverError::Status(500));
}

#[tokio::test]
async fn test_unknown_algorithm_route_is_status() {
    let url = FakeSolver::new().spawn().await;

    let err = client(&url).solve(Algorithm::Dfs).await.unwrap_err();
    assert_eq!(err, SolverError::Status(404));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let url = FakeSolver::new()
        .reply("bfs", Reply::Body("{\"expanded_nodes\": [[1, 2".to_string()))
        .spawn()
        .await;

    let err = client(&url).solve(Algorithm::Bfs).await.unwrap_err();
    assert!(matches!(err, SolverError::Decode(_)));
}

#[tokio::test]
async fn test_wire_result_replays_with_out_of_bounds_skipped() {
    let url = FakeSolver::new()
        .json(
            "bfs",
            json!({
                "expanded_nodes": [[7, 0], [99, 99], [7, 1]],
                "path": [[7, 0], [7, 1]],
                "explanation": ""
            }),
        )
        .spawn()
        .await;

    let mut engine = ReplayEngine::new(
        Grid::default_maze(),
        ReplayTiming::default(),
        VirtualScheduler::new(),
    );
    let ticket = engine.start_replay(Algorithm::Bfs);
    let answer = client(&url).solve(Algorithm::Bfs).await;
    engine.on_solve_result(ticket, answer).unwrap();
    engine.run_until_settled();

    let session = engine.session();
    assert_eq!(session.phase(), ReplayPhase::Done);
    assert_eq!(session.skipped_coordinates(), 1);
    assert_eq!(session.revealed_expanded(), &[c(7, 0), c(7, 1)]);
    assert_eq!(session.agent_position(), Some(c(7, 1)));
}
