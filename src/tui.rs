//! TUI (Terminal User Interface) for Rapid Wordle
//!
//! # Architecture
//! - `Board`: view model fed by the game's render commands
//! - `TuiInterface`: terminal setup, drawing, and key handling
//! - `run`: single-threaded event loop that interleaves key presses and clock
//!   ticks, one at a time
//!
//! # Keys
//! - Idle / game over: `ENTER` or `N` starts a game, `ESC` quits
//! - Playing: letters type, `BACKSPACE` deletes, `ENTER` submits, `ESC` quits

use crate::clock::{Clock, IntervalClock};
use crate::error::{GameError, RenderError};
use crate::feedback::LetterFeedback;
use crate::game_state::{Game, GameConfig, GuessOutcome, Phase};
use crate::render::{RenderCommand, Renderer};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CellState {
    Empty,
    Correct, // Green
    Present, // Yellow
    Absent,  // Gray
}

impl CellState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty => (Color::DarkGray, Color::White),
            Self::Correct => (Color::Green, Color::Black),
            Self::Present => (Color::Yellow, Color::Black),
            Self::Absent => (Color::Gray, Color::White),
        }
    }
}

impl From<LetterFeedback> for CellState {
    fn from(feedback: LetterFeedback) -> Self {
        match feedback {
            LetterFeedback::Correct => Self::Correct,
            LetterFeedback::Present => Self::Present,
            LetterFeedback::Absent => Self::Absent,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cell {
    pub letter: char,
    pub state: CellState,
}

impl Cell {
    const EMPTY: Self = Self {
        letter: ' ',
        state: CellState::Empty,
    };
}

/// Everything the screen shows, built from render commands.
#[derive(Debug)]
pub struct Board {
    timer: u32,
    score: u32,
    message: String,
    phase: Phase,
    columns: usize,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    #[must_use]
    pub fn new(time_limit: u32) -> Self {
        Self {
            timer: time_limit,
            score: 0,
            message: "Press ENTER to start".to_string(),
            phase: Phase::Idle,
            columns: 0,
            rows: Vec::new(),
        }
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }
}

impl Renderer for Board {
    fn render(&mut self, command: &RenderCommand) -> Result<(), RenderError> {
        match command {
            RenderCommand::Timer(secs) => self.timer = *secs,
            RenderCommand::Score(score) => self.score = *score,
            RenderCommand::Message(message) => self.message.clone_from(message),
            RenderCommand::Phase(phase) => self.phase = *phase,
            RenderCommand::ResetGrid { columns } => {
                self.columns = *columns;
                self.rows.clear();
            }
            RenderCommand::PaintCell {
                row,
                column,
                letter,
                feedback,
            } => {
                if *column >= self.columns {
                    return Err(RenderError::TargetMissing(format!(
                        "column {column} in a {}-column grid",
                        self.columns
                    )));
                }
                if *row > self.rows.len() {
                    return Err(RenderError::TargetMissing(format!(
                        "row {row} with {} rows drawn",
                        self.rows.len()
                    )));
                }
                if *row == self.rows.len() {
                    self.rows.push(vec![Cell::EMPTY; self.columns]);
                }
                self.rows[*row][*column] = Cell {
                    letter: letter.to_ascii_uppercase(),
                    state: CellState::from(*feedback),
                };
            }
        }
        Ok(())
    }
}

/// Input event forwarded to the game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    Start,
    Guess(String),
    Quit,
}

/// Key handling that does not need a terminal.
#[derive(Debug, Default)]
pub struct InputLine {
    text: String,
}

impl InputLine {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Map a key press to an action given the current phase and word length.
    pub fn handle_key(&mut self, key: KeyEvent, phase: Phase, max_len: usize) -> Option<UserAction> {
        if key.code == KeyCode::Esc {
            info_log!("handle_key() - ESC pressed, returning Quit");
            return Some(UserAction::Quit);
        }
        if has_modifier_keys(&key) {
            debug_log!("handle_key() - Ignoring key with modifier: {:?}", key.modifiers);
            return None;
        }

        match phase {
            Phase::Idle | Phase::Ended => match key.code {
                KeyCode::Enter | KeyCode::Char('n' | 'N') => {
                    self.text.clear();
                    Some(UserAction::Start)
                }
                _ => None,
            },
            Phase::Running => match key.code {
                KeyCode::Char(c) if c.is_ascii_alphabetic() && self.text.len() < max_len => {
                    self.text.push(c.to_ascii_lowercase());
                    None
                }
                KeyCode::Backspace => {
                    self.text.pop();
                    None
                }
                KeyCode::Enter => {
                    let guess = std::mem::take(&mut self.text);
                    info_log!("handle_key() - Submitting '{}'", guess);
                    Some(UserAction::Guess(guess))
                }
                _ => {
                    debug_log!("handle_key() - Ignoring key: {:?}", key.code);
                    None
                }
            },
        }
    }
}

fn has_modifier_keys(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Main TUI interface component.
///
/// Owns the terminal for its lifetime and restores it on drop.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    input: InputLine,
    active: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete");

        Ok(Self {
            terminal,
            input: InputLine::default(),
            active: true,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the board and the pending input.
    pub fn draw(&mut self, board: &Board) -> Result<(), io::Error> {
        let input = self.input.as_str();
        self.terminal.draw(|f| render_static(f, board, input))?;
        Ok(())
    }

    /// Wait up to `timeout` for a key press and translate it.
    pub fn next_action(
        &mut self,
        timeout: Duration,
        phase: Phase,
        word_length: usize,
    ) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only Press events; Release and Repeat would double the input
                if key.kind != KeyEventKind::Press {
                    return Ok(None);
                }
                // Alt-tab can leak replacement and control characters
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_action() - Ignoring invalid character {:?}", c);
                    return Ok(None);
                }
                Ok(self.input.handle_key(key, phase, word_length))
            }
            other => {
                debug_log!("next_action() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn render_static(f: &mut Frame, board: &Board, input: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Timer and score
            Constraint::Min(6),    // Grid
            Constraint::Length(3), // Message
            Constraint::Length(3), // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0]);
    render_status(f, chunks[1], board);
    render_grid(f, chunks[2], board, input);
    render_message(f, chunks[3], board.message());
    render_instructions(f, chunks[4], board.phase());
}

fn render_title(f: &mut Frame, area: Rect) {
    let title = Paragraph::new("RAPID WORDLE")
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_status(f: &mut Frame, area: Rect, board: &Board) {
    let timer_style = if board.timer() <= 10 { ERROR_STYLE } else { INFO_STYLE };
    let line = Line::from(vec![
        Span::styled(format!("Time: {}s", board.timer()), timer_style),
        Span::raw("   "),
        Span::styled(format!("Score: {}", board.score()), SUCCESS_STYLE),
        Span::raw("   "),
        Span::styled(format!("Letters: {}", board.columns()), MESSAGE_STYLE),
    ]);
    let paragraph =
        Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Status"));
    f.render_widget(paragraph, area);
}

#[allow(clippy::cast_possible_truncation)]
fn render_grid(f: &mut Frame, area: Rect, board: &Board, input: &str) {
    let block = Block::default().title("Guesses").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let showing_input = board.phase() == Phase::Running;
    let rows_needed = board.rows().len() + usize::from(showing_input);
    let available_rows = (inner.height / ROW_SPACING) as usize;
    // Most recent rows win when the grid overflows
    let skip_count = rows_needed.saturating_sub(available_rows);

    for (display_index, row) in board.rows().iter().skip(skip_count).enumerate() {
        render_cells(f, inner, display_index, row.iter().copied());
    }

    if showing_input {
        let display_index = board.rows().len() - skip_count.min(board.rows().len());
        let mut letters = input.chars();
        let cells = (0..board.columns()).map(|_| Cell {
            letter: letters.next().map_or(' ', |c| c.to_ascii_uppercase()),
            state: CellState::Empty,
        });
        render_cells(f, inner, display_index, cells);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_cells(f: &mut Frame, area: Rect, row_index: usize, cells: impl Iterator<Item = Cell>) {
    let y = area.y + (row_index as u16 * ROW_SPACING);
    if y >= area.y + area.height {
        return;
    }

    let mut spans = vec![Span::raw("  ")];
    for cell in cells {
        let (bg_color, fg_color) = cell.state.colors();
        spans.push(Span::styled(
            format!(" {} ", cell.letter),
            Style::default().fg(fg_color).bg(bg_color),
        ));
        spans.push(Span::raw(" "));
    }

    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_message(f: &mut Frame, area: Rect, message: &str) {
    let paragraph = Paragraph::new(Span::styled(message, MESSAGE_STYLE))
        .block(Block::default().borders(Borders::ALL).title("Feedback"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, phase: Phase) {
    let text = match phase {
        Phase::Idle => "ENTER: Start | ESC: Quit",
        Phase::Running => "Type your guess | ENTER: Submit | BACKSPACE: Delete | ESC: Quit",
        Phase::Ended => "N / ENTER: New Game | ESC: Quit",
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Apply one input event to the game.
pub fn dispatch<C: Clock>(game: &mut Game<C>, action: UserAction) {
    match action {
        UserAction::Start => {
            if let Err(e) = game.start() {
                warn!("Could not start game: {e}");
            }
        }
        UserAction::Guess(text) => match game.submit_guess(&text) {
            Ok(GuessOutcome::Solved(_)) => info_log!("Solved, score {}", game.score()),
            Ok(GuessOutcome::Missed(feedback)) => {
                debug_log!("Missed with {}", feedback.pattern());
            }
            Err(GameError::InvalidGuessLength { expected, actual }) => {
                debug_log!("Guess had {} letters, wanted {}", actual, expected);
            }
            Err(e) => warn!("Guess '{text}' not applied: {e}"),
        },
        UserAction::Quit => game.end(),
    }
}

/// Run the game in the terminal until the player quits. Returns the last
/// score.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn, or read.
pub fn run(config: &GameConfig) -> Result<u32, io::Error> {
    let mut game = Game::from_config(config, IntervalClock::new());
    let mut board = Board::new(config.time_limit);
    let mut tui = TuiInterface::new()?;

    loop {
        tui.draw(&board)?;

        let poll = Duration::from_millis(EVENT_POLL_TIMEOUT_MS);
        let timeout = game.clock().until_next().map_or(poll, |next| next.min(poll));
        let action = tui.next_action(timeout, game.phase(), game.word_length())?;
        let quit = action == Some(UserAction::Quit);
        if let Some(action) = action {
            dispatch(&mut game, action);
        }

        game.run_due_ticks();
        game.flush(&mut board);
        if quit {
            break;
        }
    }

    tui.cleanup()?;
    Ok(game.score())
}
