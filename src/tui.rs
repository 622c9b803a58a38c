//! TUI (Terminal User Interface) module for Word Scramble
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # Layout
//! Title with the puzzle word, the list of found words next to an
//! information panel, then the input line, status and key help.
//!
//! # States
//! - `EnteringWord`: letters go into the input line, ENTER submits
//! - `ConfirmingNewGame`: Y/ENTER starts over, anything else goes back

use crate::error::Rejection;
use crate::game_state::{GameInterface, PuzzleInfo, UserAction};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use std::io;

const MAX_INPUT_LENGTH: usize = 32;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const ERROR_TITLE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TuiState {
    EnteringWord,
    ConfirmingNewGame,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    puzzle_word: &'a str,
    guesses: &'a [String],
    current_input: &'a str,
    state: TuiState,
    message: &'a str,
    rejection: Option<&'a Rejection>,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    puzzle_word: String,
    guesses: Vec<String>,
    current_input: String,
    state: TuiState,
    message: String,
    rejection: Option<Rejection>,
    status: String,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal backend created");

        Ok(Self {
            terminal,
            puzzle_word: String::new(),
            guesses: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringWord,
            message: String::new(),
            rejection: None,
            status: "Ready".to_string(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            puzzle_word: &self.puzzle_word,
            guesses: &self.guesses,
            current_input: &self.current_input,
            state: self.state,
            message: &self.message,
            rejection: self.rejection.as_ref(),
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(6),    // Words + info
                Constraint::Length(3), // Input
                Constraint::Length(3), // Status line
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(rows[1]);

        Self::render_title(f, rows[0], ctx.puzzle_word);
        Self::render_guesses(f, columns[0], ctx.guesses);
        Self::render_info(f, columns[1], ctx.message, ctx.rejection);
        Self::render_input(f, rows[2], ctx.current_input, ctx.state);
        Self::render_status(f, rows[3], ctx.status);
        Self::render_instructions(f, rows[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect, puzzle_word: &str) {
        let title = Paragraph::new(Line::from(vec![
            Span::styled("WORD SCRAMBLE  ", HEADER_STYLE),
            Span::styled(puzzle_word.to_uppercase(), INFO_STYLE),
        ]))
        .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_guesses(f: &mut Frame, area: Rect, guesses: &[String]) {
        let items: Vec<ListItem> = guesses
            .iter()
            .map(|word| ListItem::new(word.as_str()))
            .collect();
        let list = List::new(items).block(
            Block::default()
                .title(format!("Words found ({})", guesses.len()))
                .borders(Borders::ALL),
        );
        f.render_widget(list, area);
    }

    fn render_info(f: &mut Frame, area: Rect, message: &str, rejection: Option<&Rejection>) {
        let mut lines = Vec::new();

        if let Some(rejection) = rejection {
            lines.push(Line::from(vec![Span::styled(
                rejection.title(),
                ERROR_TITLE_STYLE,
            )]));
            lines.push(Line::from(vec![Span::styled(
                rejection.to_string(),
                ERROR_STYLE,
            )]));
            lines.push(Line::from(""));
        }

        if !message.is_empty() {
            lines.push(Line::from(vec![Span::styled(message, MESSAGE_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, current_input: &str, state: TuiState) {
        let text = match state {
            TuiState::EnteringWord => Line::from(vec![
                Span::raw(current_input),
                Span::styled("_", SUCCESS_STYLE),
            ]),
            TuiState::ConfirmingNewGame => {
                Line::from(Span::styled("Start a new game? (y/n)", INFO_STYLE))
            }
        };
        let paragraph =
            Paragraph::new(text).block(Block::default().title("Answer").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringWord => "Type a word | ENTER: Submit | CTRL-N: New game | ESC: Quit",
            TuiState::ConfirmingNewGame => "Y/ENTER: New game | any other key: Back",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    fn handle_input(&mut self) -> Result<Option<UserAction>, io::Error> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        let Event::Key(key) = event::read()? else {
            debug_log!("handle_input() - Ignoring non-key event");
            return Ok(None);
        };

        // Only process Press events, ignore Release and Repeat to avoid double input
        if key.kind != event::KeyEventKind::Press {
            return Ok(None);
        }

        // Garbage from escape sequences when alt-tabbing
        if let KeyCode::Char(c) = key.code
            && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
        {
            debug_log!("handle_input() - Ignoring control character: {:?}", c);
            return Ok(None);
        }

        Ok(match self.state {
            TuiState::EnteringWord => self.handle_word_input(key),
            TuiState::ConfirmingNewGame => self.handle_confirm_input(key),
        })
    }

    fn handle_word_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        let has_ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let has_alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('n' | 'N') if has_ctrl => {
                self.state = TuiState::ConfirmingNewGame;
                self.status = "Confirm new game".to_string();
            }
            KeyCode::Char(c) if c.is_alphabetic() && !has_ctrl && !has_alt => {
                if self.current_input.chars().count() < MAX_INPUT_LENGTH {
                    self.current_input.extend(c.to_lowercase());
                    self.rejection = None;
                }
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Enter if !self.current_input.is_empty() => {
                let word = std::mem::take(&mut self.current_input);
                info_log!("handle_word_input() - Submitting '{}'", word);
                return Some(UserAction::Guess(word));
            }
            KeyCode::Esc => {
                info_log!("handle_word_input() - ESC pressed, returning Exit");
                return Some(UserAction::Exit);
            }
            _ => {
                debug_log!("handle_word_input() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }

    fn handle_confirm_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.state = TuiState::EnteringWord;
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => Some(UserAction::NewGame),
            _ => {
                self.status = "Ready".to_string();
                None
            }
        }
    }

    fn show_puzzle(&mut self, info: &PuzzleInfo) {
        self.puzzle_word.clone_from(&info.puzzle_word);
        self.guesses.clone_from(&info.guesses);
        self.current_input.clear();
        self.rejection = None;
        self.state = TuiState::EnteringWord;
    }
}

impl GameInterface for TuiInterface {
    fn display_puzzle(&mut self, info: &PuzzleInfo) {
        self.show_puzzle(info);
        self.message = if info.resumed {
            format!("Resumed saved game. {} words found so far.", info.guesses.len())
        } else {
            format!("Spell words using the letters of {}.", info.puzzle_word)
        };
        self.status = puzzle_status(info);
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }

            match self.handle_input() {
                Ok(Some(action)) => return Some(action),
                Ok(None) => {}
                Err(e) => {
                    info_log!("read_action() - Input error: {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            }
        }
    }

    fn display_accepted(&mut self, word: &str, guesses: &[String]) {
        self.guesses = guesses.to_vec();
        self.rejection = None;
        self.message = format!("Accepted: {word}");
        self.status = format!("{} words found", guesses.len());
        self.draw_or_log();
    }

    fn display_rejection(&mut self, rejection: &Rejection) {
        self.rejection = Some(rejection.clone());
        self.message.clear();
        self.status = "Try again".to_string();
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, info: &PuzzleInfo) {
        self.show_puzzle(info);
        self.message = format!("New game started with {}.", info.puzzle_word);
        self.status = "New game - Enter your first word".to_string();
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }
}

fn puzzle_status(info: &PuzzleInfo) -> String {
    if info.resumed {
        format!("Saved game resumed - {} words found", info.guesses.len())
    } else {
        "Enter your first word".to_string()
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
