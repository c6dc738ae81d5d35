//! Side panel with the solver's explanation and a color legend.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::palette::{
    BG_BASE, BORDER_DEFAULT, CELL_END_BG, CELL_EXPANDED_BG, CELL_PATH_BG, CELL_START_BG,
    TEXT_BRIGHT, TEXT_MUTED, TEXT_PRIMARY,
};
use crate::replay::ReplaySnapshot;

pub struct SolutionPanel<'a> {
    snapshot: &'a ReplaySnapshot,
}

impl<'a> SolutionPanel<'a> {
    pub fn new(snapshot: &'a ReplaySnapshot) -> Self {
        Self { snapshot }
    }

    fn title(&self) -> String {
        match self.snapshot.algorithm() {
            Some(algorithm) => format!(" Solution ({}) ", algorithm.display_name()),
            None => " Solution ".to_string(),
        }
    }

    fn body(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        match self.snapshot.explanation() {
            Some(text) if !text.trim().is_empty() => {
                for paragraph in text.lines() {
                    lines.push(Line::from(Span::styled(
                        paragraph.to_string(),
                        Style::default().fg(TEXT_PRIMARY),
                    )));
                }
            }
            _ => lines.push(Line::from(Span::styled(
                "No explanation yet",
                Style::default().fg(TEXT_MUTED),
            ))),
        }

        lines.push(Line::default());
        for (color, name) in [
            (CELL_START_BG, "start"),
            (CELL_END_BG, "end"),
            (CELL_EXPANDED_BG, "expanded"),
            (CELL_PATH_BG, "path"),
        ] {
            lines.push(Line::from(vec![
                Span::styled("   ", Style::default().bg(color)),
                Span::styled(format!(" {}", name), Style::default().fg(TEXT_MUTED)),
            ]));
        }
        lines
    }
}

impl Widget for SolutionPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER_DEFAULT))
            .title(self.title())
            .title_style(
                Style::default()
                    .fg(TEXT_BRIGHT)
                    .add_modifier(Modifier::BOLD),
            )
            .style(Style::default().bg(BG_BASE));

        Paragraph::new(self.body())
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
