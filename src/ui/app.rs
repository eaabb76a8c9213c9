//! Main TUI application state and logic

use crate::playback::SPEED_PRESETS;
use crate::player::Player;
use crate::trace::ExecutionSnapshot;
use crate::ui::panes::{
    render_output_pane, render_source_pane, render_stack_pane, render_status_bar,
    render_variables_pane, OutputRenderData, SourceRenderData, SourceScrollState,
    StackRenderData, StatusRenderData, VariablesRenderData,
};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Output,
    Stack,
    Variables,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> output -> stack -> variables)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Source,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Variables,
            FocusedPane::Output => FocusedPane::Source,
            FocusedPane::Stack => FocusedPane::Output,
            FocusedPane::Variables => FocusedPane::Stack,
        }
    }
}

/// The main application state
pub struct App {
    /// The playback facade over the loaded trace
    pub player: Player,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub source_scroll: SourceScrollState,
    pub stack_scroll: usize,
    pub variables_scroll: usize,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over a loaded player
    pub fn new(player: Player) -> Self {
        let focused_pane = if player.source().is_some() {
            FocusedPane::Source
        } else {
            FocusedPane::Output
        };
        App {
            player,
            focused_pane,
            source_scroll: SourceScrollState {
                offset: 0,
                target_line_row: None, // centered on first render
            },
            stack_scroll: 0,
            variables_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Drive auto-play between frames
            let advanced = self.player.tick(Instant::now());
            if advanced > 0 {
                self.output_scroll = usize::MAX;
                if self.player.is_playing() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.status_message = "Playback complete".to_string();
                }
            }

            // Use poll with timeout so auto-play keeps moving between keys
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let snapshot = match self.player.current_snapshot() {
            Ok(snapshot) => snapshot.clone(),
            Err(e) => {
                // unreachable through the controller's bounds guard
                self.status_message = format!("Error: {}", e);
                return;
            }
        };

        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(pane_area);

        self.render_left_column(frame, columns[0], &snapshot);

        // Right column: Stack (top) | Variables (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);

        render_stack_pane(
            frame,
            right_rows[0],
            StackRenderData {
                call_stack: &snapshot.call_stack,
            },
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        render_variables_pane(
            frame,
            right_rows[1],
            VariablesRenderData {
                variables: &snapshot.variables,
            },
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
        );

        render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                message: &self.status_message,
                current_step: self.player.current_step(),
                total_steps: self.player.total_steps(),
                progress: self.player.progress(),
                speed_ms: self.player.speed().as_millis() as u64,
                is_playing: self.player.is_playing(),
            },
        );
    }

    /// Left column: Source (top) | Console (bottom), or the console alone
    /// when the trace carries no source text
    fn render_left_column(&mut self, frame: &mut Frame, area: Rect, snapshot: &ExecutionSnapshot) {
        if let Some(source) = self.player.source() {
            let source = source.to_string();
            let left_rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
                .split(area);

            render_source_pane(
                frame,
                left_rows[0],
                SourceRenderData {
                    source: &source,
                    current_line: snapshot.line,
                },
                self.focused_pane == FocusedPane::Source,
                &mut self.source_scroll,
            );

            render_output_pane(
                frame,
                left_rows[1],
                OutputRenderData {
                    output: &snapshot.output,
                },
                self.focused_pane == FocusedPane::Output,
                &mut self.output_scroll,
            );
        } else {
            render_output_pane(
                frame,
                area,
                OutputRenderData {
                    output: &snapshot.output,
                },
                self.focused_pane == FocusedPane::Output,
                &mut self.output_scroll,
            );
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.cycle_focus(true);
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
            }
            KeyCode::Right => {
                self.step_forward();
            }
            KeyCode::Char(' ') => {
                // Toggle play/pause (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.toggle_play();
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                self.player.reset();
                self.stack_scroll = 0;
                self.variables_scroll = 0;
                self.output_scroll = 0;
                self.status_message = "Reset to start".to_string();
            }
            // Number keys select speed presets
            KeyCode::Char(c @ '1'..='4') => {
                let preset = SPEED_PRESETS[(c as usize) - ('1' as usize)];
                self.player.set_speed(Duration::from_millis(preset));
                self.status_message = format!("Speed: {}ms", preset);
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_sub(1);
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_sub(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling down makes the current line move up visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Stack => {
                    self.stack_scroll = self.stack_scroll.saturating_add(1);
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_add(1);
                }
                FocusedPane::Output => {
                    self.output_scroll = self.output_scroll.saturating_add(1);
                }
            },
            _ => {}
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let mut next = if forward {
            self.focused_pane.next()
        } else {
            self.focused_pane.prev()
        };
        // No source pane to focus when the trace carries no source text
        if self.player.source().is_none() && next == FocusedPane::Source {
            next = if forward { next.next() } else { next.prev() };
        }
        self.focused_pane = next;
    }

    /// Step forward once; rejected at the last step
    fn step_forward(&mut self) {
        if self.player.is_finished() {
            self.status_message = "End of trace (r to reset)".to_string();
            return;
        }
        self.player.step();
        self.status_message = "Stepped forward".to_string();
        // Auto-scroll console to bottom
        self.output_scroll = usize::MAX;
    }

    /// Toggle auto-play; rejected at the last step
    fn toggle_play(&mut self) {
        if self.player.is_playing() {
            self.player.pause();
            self.status_message = "Paused".to_string();
        } else if self.player.is_finished() {
            self.status_message = "End of trace (r to reset)".to_string();
        } else {
            self.player.play(Instant::now());
            self.status_message = "Playing...".to_string();
        }
    }
}
