//! Integration tests for mazewalk
//!
//! These tests verify that multiple components work together correctly.

#[path = "../common/mod.rs"]
pub mod common;

pub mod app_flow;
pub mod http_solver;
pub mod maze_render;
pub mod replay_scenarios;
