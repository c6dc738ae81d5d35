use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{enable_raw_mode, EnterAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::grid::Grid;
use crate::replay::{ReplayEngine, ReplayTick, ReplayTiming, TokioScheduler};
use crate::solver::{Algorithm, SolverClient};
use crate::ui::action::{Action, KEY_HINTS};
use crate::ui::components::{
    render_key_hints, KeyHintBarStyle, MazeView, SolutionPanel, StatusBar, BG_BASE,
    BORDER_DEFAULT, TEXT_BRIGHT, TEXT_MUTED,
};
use crate::ui::events::AppEvent;
use crate::ui::terminal_guard::TerminalGuard;

/// Main application state
pub struct App {
    /// Replay state machine, timers on the tokio runtime
    engine: ReplayEngine<TokioScheduler>,
    /// Scheduled ticks coming due
    tick_rx: mpsc::UnboundedReceiver<ReplayTick>,
    solver: Arc<dyn SolverClient>,
    /// Event channel sender
    event_tx: mpsc::UnboundedSender<AppEvent>,
    /// Event channel receiver
    event_rx: mpsc::UnboundedReceiver<AppEvent>,
    /// Algorithm of the most recent replay, for `Action::Replay`
    last_algorithm: Option<Algorithm>,
    /// Message shown in the status bar until the next replay
    notice: Option<String>,
    /// Whether the app should quit
    should_quit: bool,
}

impl App {
    pub fn new(grid: Grid, timing: ReplayTiming, solver: Arc<dyn SolverClient>) -> Self {
        let (scheduler, tick_rx) = TokioScheduler::channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        Self {
            engine: ReplayEngine::new(grid, timing, scheduler),
            tick_rx,
            solver,
            event_tx,
            event_rx,
            last_algorithm: None,
            notice: None,
            should_quit: false,
        }
    }

    pub fn engine(&self) -> &ReplayEngine<TokioScheduler> {
        &self.engine
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Sender for feeding events into the app from outside the loop
    pub fn event_sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_tx.clone()
    }

    /// Run the application main loop, optionally kicking off a replay first
    pub async fn run(&mut self, initial: Option<Algorithm>) -> anyhow::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut guard = TerminalGuard::new();
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        if let Some(algorithm) = initial {
            self.handle_action(Action::Solve(algorithm));
        }

        let result = self.event_loop(&mut terminal).await;

        self.engine.cancel();
        guard.cleanup()?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;

            tokio::select! {
                // Terminal input, polled once per frame
                _ = tokio::time::sleep(Duration::from_millis(16)) => {
                    while event::poll(Duration::from_millis(0))? {
                        let event = event::read()?;
                        self.handle_app_event(AppEvent::Input(event));
                    }
                }

                Some(tick) = self.tick_rx.recv() => {
                    self.engine.on_tick(tick);
                }

                Some(event) = self.event_rx.recv() => {
                    self.handle_app_event(event);
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Wait for the next replay tick or app event and apply it.
    ///
    /// Returns false once both channels are closed.
    pub async fn process_next_event(&mut self) -> bool {
        tokio::select! {
            Some(tick) = self.tick_rx.recv() => {
                self.engine.on_tick(tick);
                true
            }
            Some(event) = self.event_rx.recv() => {
                self.handle_app_event(event);
                true
            }
            else => false,
        }
    }

    pub fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Input(Event::Key(key)) => {
                if let Some(action) = Action::from_key(key) {
                    self.handle_action(action);
                }
            }
            AppEvent::Input(_) => {}
            AppEvent::SolveCompleted { ticket, result } => {
                if let Err(e) = self.engine.on_solve_result(ticket, result) {
                    tracing::warn!(error = %e, "Replay aborted");
                    self.notice = Some(e.to_string());
                }
            }
            AppEvent::Error(message) => {
                tracing::error!(error = %message, "App error");
                self.notice = Some(message);
            }
            AppEvent::Quit => self.should_quit = true,
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        tracing::debug!(action = action.description(), "Handling action");
        match action {
            Action::Solve(algorithm) => self.start_replay(algorithm),
            Action::Replay => match self.last_algorithm {
                Some(algorithm) => self.start_replay(algorithm),
                None => self.notice = Some("Nothing to replay yet".to_string()),
            },
            Action::Cancel => self.engine.cancel(),
            Action::Quit => self.should_quit = true,
        }
    }

    /// Begin a new session and fetch its solver result in the background
    fn start_replay(&mut self, algorithm: Algorithm) {
        self.notice = None;
        self.last_algorithm = Some(algorithm);
        let ticket = self.engine.start_replay(algorithm);

        let solver = Arc::clone(&self.solver);
        let event_tx = self.event_tx.clone();
        tokio::spawn(async move {
            let result = solver.solve(algorithm).await;
            if event_tx
                .send(AppEvent::SolveCompleted { ticket, result })
                .is_err()
            {
                tracing::debug!(generation = ticket.generation, "App gone before solve finished");
            }
        });
    }

    pub fn draw(&self, f: &mut Frame) {
        let area = f.area();
        f.render_widget(Block::default().style(Style::default().bg(BG_BASE)), area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Min(3),    // maze + solution
                Constraint::Length(1), // status
                Constraint::Length(1), // key hints
            ])
            .split(area);

        self.draw_title(f, rows[0]);
        self.draw_body(f, rows[1]);

        let snapshot = self.engine.snapshot();
        StatusBar::new(&snapshot)
            .cancelled(self.engine.is_cancelled())
            .notice(self.notice.as_deref())
            .render(rows[2], f.buffer_mut());

        render_key_hints(
            rows[3],
            f.buffer_mut(),
            KEY_HINTS,
            KeyHintBarStyle::footer_bar(),
        );
    }

    fn draw_title(&self, f: &mut Frame, area: Rect) {
        let (rows, cols) = self.engine.grid().dimensions();
        let title = Line::from(vec![
            Span::styled(
                " mazewalk",
                Style::default()
                    .fg(TEXT_BRIGHT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}×{} grid", rows, cols),
                Style::default().fg(TEXT_MUTED),
            ),
        ]);
        f.render_widget(Paragraph::new(title), area);
    }

    fn draw_body(&self, f: &mut Frame, area: Rect) {
        let snapshot = self.engine.snapshot();
        let maze = MazeView::new(self.engine.grid(), &snapshot);
        let (maze_width, _) = maze.size();

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(maze_width + 2), Constraint::Min(20)])
            .split(area);

        let maze_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(BORDER_DEFAULT));
        let maze_area = maze_block.inner(columns[0]);
        f.render_widget(maze_block, columns[0]);
        f.render_widget(maze, maze_area);

        f.render_widget(SolutionPanel::new(&snapshot), columns[1]);
    }
}
