use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
};

use crate::replay::{ReplayPhase, ReplaySnapshot};
use crate::ui::components::{
    ACCENT_ERROR, ACCENT_PRIMARY, ACCENT_SUCCESS, ACCENT_WARNING, BG_SURFACE, TEXT_BRIGHT,
    TEXT_FAINT, TEXT_MUTED,
};

/// One-line summary of the live replay
pub struct StatusBar<'a> {
    snapshot: &'a ReplaySnapshot,
    /// Replay frozen by the user
    cancelled: bool,
    /// Transient message, e.g. an error the session itself does not carry
    notice: Option<&'a str>,
}

impl<'a> StatusBar<'a> {
    pub fn new(snapshot: &'a ReplaySnapshot) -> Self {
        Self {
            snapshot,
            cancelled: false,
            notice: None,
        }
    }

    pub fn cancelled(mut self, cancelled: bool) -> Self {
        self.cancelled = cancelled;
        self
    }

    pub fn notice(mut self, notice: Option<&'a str>) -> Self {
        self.notice = notice;
        self
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let left = self.build_phase_spans();
        let right = self.build_progress_spans();
        self.render_split_line(area, buf, left, right);
    }

    /// Algorithm, phase and any error
    fn build_phase_spans(&self) -> Vec<Span<'static>> {
        let mut spans = vec![Span::raw(" ")];

        let Some(algorithm) = self.snapshot.algorithm() else {
            spans.push(Span::styled(
                "Pick an algorithm to start",
                Style::default().fg(TEXT_MUTED),
            ));
            return spans;
        };

        spans.push(Span::styled(
            algorithm.display_name(),
            Style::default().fg(TEXT_BRIGHT),
        ));
        spans.push(Span::styled(" │ ", Style::default().fg(TEXT_FAINT)));

        let phase = self.snapshot.phase();
        let phase_color = match phase {
            ReplayPhase::Idle => TEXT_MUTED,
            ReplayPhase::Expanding | ReplayPhase::PathRevealed | ReplayPhase::Traversing => {
                ACCENT_PRIMARY
            }
            ReplayPhase::Done => ACCENT_SUCCESS,
            ReplayPhase::Failed => ACCENT_ERROR,
        };
        let phase_text = if phase == ReplayPhase::Idle {
            "solving…"
        } else {
            phase.label()
        };
        spans.push(Span::styled(phase_text, Style::default().fg(phase_color)));

        if self.cancelled && !phase.is_terminal() {
            spans.push(Span::styled(
                " (cancelled)",
                Style::default().fg(ACCENT_WARNING),
            ));
        }

        if let Some(error) = self.snapshot.error().or(self.notice) {
            spans.push(Span::styled(" │ ", Style::default().fg(TEXT_FAINT)));
            spans.push(Span::styled(
                error.to_string(),
                Style::default().fg(ACCENT_ERROR),
            ));
        }

        spans
    }

    /// expanded 12/40 · path 9 · skipped 2
    fn build_progress_spans(&self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        let phase = self.snapshot.phase();
        if matches!(phase, ReplayPhase::Idle | ReplayPhase::Failed) {
            return spans;
        }

        spans.push(Span::styled(
            format!(
                "expanded {}/{}",
                self.snapshot.revealed_expanded().len(),
                self.snapshot.expanded_total()
            ),
            Style::default().fg(TEXT_MUTED),
        ));

        if !self.snapshot.revealed_path().is_empty() {
            spans.push(Span::styled(" · ", Style::default().fg(TEXT_FAINT)));
            spans.push(Span::styled(
                format!("path {}", self.snapshot.revealed_path().len()),
                Style::default().fg(TEXT_MUTED),
            ));
        } else if phase == ReplayPhase::Done {
            spans.push(Span::styled(" · ", Style::default().fg(TEXT_FAINT)));
            spans.push(Span::styled("no path", Style::default().fg(ACCENT_WARNING)));
        }

        let skipped = self.snapshot.skipped_coordinates();
        if skipped > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(TEXT_FAINT)));
            spans.push(Span::styled(
                format!("skipped {}", skipped),
                Style::default().fg(ACCENT_WARNING),
            ));
        }

        spans.push(Span::raw("  "));
        spans
    }

    /// Render status bar with left and right content
    fn render_split_line(
        &self,
        area: Rect,
        buf: &mut Buffer,
        left_spans: Vec<Span<'static>>,
        right_spans: Vec<Span<'static>>,
    ) {
        buf.set_style(area, Style::default().bg(BG_SURFACE));

        let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
        let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
        let total_width = area.width as usize;

        let left_line = Line::from(left_spans);
        buf.set_line(
            area.x,
            area.y,
            &left_line,
            (left_width as u16).min(area.width),
        );

        // Right side only when it does not collide with the left
        if !right_spans.is_empty() && left_width + right_width < total_width {
            let right_x = area.x + (total_width - right_width) as u16;
            let right_line = Line::from(right_spans);
            buf.set_line(right_x, area.y, &right_line, right_width as u16);
        }
    }
}
