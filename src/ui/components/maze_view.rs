//! Maze grid widget.
//!
//! Every cell is drawn as a `CELL_WIDTH`-column box. Colors come from the
//! cell's display category (see [`crate::render::classify`]); text is the
//! cell's label, or a marker glyph for the agent and start/end.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use super::palette::{
    CELL_AGENT_FG, CELL_END_BG, CELL_EXPANDED_BG, CELL_OPEN_BG, CELL_PATH_BG, CELL_START_BG,
    CELL_WALL, TEXT_BRIGHT, TEXT_PRIMARY,
};
use crate::grid::{CellKind, Coordinate, Grid};
use crate::render::{classify, CellDisplay};
use crate::replay::ReplaySnapshot;

/// Terminal columns per maze cell
pub const CELL_WIDTH: u16 = 3;

pub struct MazeView<'a> {
    grid: &'a Grid,
    snapshot: &'a ReplaySnapshot,
}

impl<'a> MazeView<'a> {
    pub fn new(grid: &'a Grid, snapshot: &'a ReplaySnapshot) -> Self {
        Self { grid, snapshot }
    }

    /// Width and height needed to draw the whole maze
    pub fn size(&self) -> (u16, u16) {
        let width = (self.grid.cols() as u16).saturating_mul(CELL_WIDTH);
        (width, self.grid.rows() as u16)
    }
}

fn cell_appearance(kind: Option<&CellKind>, display: &CellDisplay) -> (String, Style) {
    let label = match kind {
        Some(CellKind::Labeled(label)) => Some(label.as_str()),
        _ => None,
    };
    let centered = |text: &str| format!("{:^width$}", text, width = CELL_WIDTH as usize);

    match display {
        CellDisplay::Agent => (
            centered("@"),
            Style::default()
                .fg(CELL_AGENT_FG)
                .bg(CELL_PATH_BG)
                .add_modifier(Modifier::BOLD),
        ),
        CellDisplay::Start => (
            centered("A"),
            Style::default()
                .fg(TEXT_BRIGHT)
                .bg(CELL_START_BG)
                .add_modifier(Modifier::BOLD),
        ),
        CellDisplay::End => (
            centered("B"),
            Style::default()
                .fg(TEXT_BRIGHT)
                .bg(CELL_END_BG)
                .add_modifier(Modifier::BOLD),
        ),
        CellDisplay::Path => (
            centered(label.unwrap_or("•")),
            Style::default().fg(TEXT_BRIGHT).bg(CELL_PATH_BG),
        ),
        CellDisplay::Expanded => (
            centered(label.unwrap_or("·")),
            Style::default().fg(TEXT_BRIGHT).bg(CELL_EXPANDED_BG),
        ),
        CellDisplay::Wall => (
            "█".repeat(CELL_WIDTH as usize),
            Style::default().fg(CELL_WALL),
        ),
        CellDisplay::Label(text) => (
            centered(text),
            Style::default().fg(TEXT_PRIMARY).bg(CELL_OPEN_BG),
        ),
        CellDisplay::Open => (centered(""), Style::default().bg(CELL_OPEN_BG)),
    }
}

impl Widget for MazeView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..self.grid.rows() {
            let y = area.y + row as u16;
            if y >= area.bottom() {
                break;
            }
            for col in 0..self.grid.cols() {
                let x = area.x + col as u16 * CELL_WIDTH;
                if x >= area.right() {
                    break;
                }
                let coord = Coordinate::new(row as i64, col as i64);
                let display = classify(self.grid, self.snapshot, coord);
                let (text, style) = cell_appearance(self.grid.get(coord), &display);
                let max_width = (area.right() - x).min(CELL_WIDTH) as usize;
                buf.set_stringn(x, y, text, max_width, style);
            }
        }
    }
}
