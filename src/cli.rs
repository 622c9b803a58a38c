use crate::dictionary::DEFAULT_LOCALE;
use crate::error::Rejection;
use crate::game_state::{GameInterface, PuzzleInfo, UserAction};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;

/// Word Scramble: spell new words from the letters of a start word
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited list of start words
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Path to a newline-delimited dictionary of accepted words
    #[arg(short = 'd', long = "dictionary")]
    pub dictionary_path: Option<String>,

    /// Dictionary locale
    #[arg(long, default_value = DEFAULT_LOCALE)]
    pub locale: String,

    /// Where to keep the saved game (defaults to the user data directory)
    #[arg(long = "save-file")]
    pub save_file: Option<PathBuf>,

    /// Keep progress in memory only
    #[arg(long = "no-save", conflicts_with = "save_file")]
    pub no_save: bool,

    /// Seed for picking puzzle words
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the full-screen terminal interface
    #[arg(long)]
    pub tui: bool,

    /// Append log output to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub enum GuessInput {
    Word(String),
    Empty,
    Exit,
    NewGame,
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> GuessInput {
    println!("\nEnter a word (or 'new' to start a new game, 'exit' to quit):");
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => return GuessInput::Exit,
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::InvalidData => {
            println!("Could not read that line. Please enter a word.");
            return GuessInput::Empty;
        }
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            return GuessInput::Exit;
        }
    }
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "exit" => GuessInput::Exit,
        "new" => GuessInput::NewGame,
        "" => {
            println!("Please enter a word.");
            GuessInput::Empty
        }
        _ => GuessInput::Word(input),
    }
}

pub fn display_guesses(guesses: &[String]) {
    if guesses.is_empty() {
        println!("No words found yet.");
        return;
    }
    println!("Words found ({}):", guesses.len());
    for word in guesses {
        println!("  {word}");
    }
}

pub fn display_puzzle(info: &PuzzleInfo) {
    println!("Puzzle word: {}", info.puzzle_word.to_uppercase());
    if info.resumed {
        println!("(Resumed saved game.)");
    }
    display_guesses(&info.guesses);
}

pub fn display_accepted(word: &str, guesses: &[String]) {
    println!("Accepted: {word}");
    display_guesses(guesses);
}

pub fn display_rejection(rejection: &Rejection) {
    println!("{}: {}", rejection.title(), rejection);
}

pub fn display_new_game_message(info: &PuzzleInfo) {
    println!("New game started.");
    display_puzzle(info);
}

pub fn display_exit_message() {
    println!("Exiting.");
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for CLI interaction
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_puzzle(&mut self, info: &PuzzleInfo) {
        display_puzzle(info);
    }

    fn read_action(&mut self) -> Option<UserAction> {
        match read_guess(&mut self.reader) {
            GuessInput::Word(word) => Some(UserAction::Guess(word)),
            GuessInput::Exit => Some(UserAction::Exit),
            GuessInput::NewGame => Some(UserAction::NewGame),
            GuessInput::Empty => None,
        }
    }

    fn display_accepted(&mut self, word: &str, guesses: &[String]) {
        display_accepted(word, guesses);
    }

    fn display_rejection(&mut self, rejection: &Rejection) {
        display_rejection(rejection);
    }

    fn display_new_game_message(&mut self, info: &PuzzleInfo) {
        display_new_game_message(info);
    }

    fn display_exit_message(&mut self) {
        display_exit_message();
    }
}
