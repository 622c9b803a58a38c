//! Rules deciding whether a guess counts.
//!
//! Checks run in a fixed order: possible, original, real. The first
//! failure wins.

use crate::dictionary::Dictionary;
use crate::error::Rejection;

/// Shortest guess the game accepts.
pub const MIN_WORD_LENGTH: usize = 3;

/// True when every letter of `candidate` can be taken, without
/// replacement, from the letters of `puzzle_word`. Case-insensitive.
pub fn is_possible(candidate: &str, puzzle_word: &str) -> bool {
    let mut remaining: Vec<char> = puzzle_word.to_lowercase().chars().collect();
    for letter in candidate.to_lowercase().chars() {
        match remaining.iter().position(|&c| c == letter) {
            Some(pos) => {
                remaining.swap_remove(pos);
            }
            None => return false,
        }
    }
    true
}

/// Rejects the puzzle word itself and anything already guessed.
pub fn is_original(
    candidate: &str,
    puzzle_word: &str,
    history: &[String],
) -> Result<(), Rejection> {
    let lowered = candidate.to_lowercase();
    if lowered == puzzle_word.to_lowercase() {
        return Err(Rejection::SameWord);
    }
    if history.iter().any(|used| used.to_lowercase() == lowered) {
        return Err(Rejection::AlreadyUsed);
    }
    Ok(())
}

pub fn is_real<D: Dictionary + ?Sized>(candidate: &str, dictionary: &D, locale: &str) -> bool {
    if candidate.chars().count() < MIN_WORD_LENGTH {
        return false;
    }
    dictionary.is_real_word(candidate, locale)
}

/// Runs all three checks against the current puzzle.
pub fn validate<D: Dictionary + ?Sized>(
    candidate: &str,
    puzzle_word: &str,
    history: &[String],
    dictionary: &D,
    locale: &str,
) -> Result<(), Rejection> {
    if !is_possible(candidate, puzzle_word) {
        return Err(Rejection::NotPossible {
            puzzle_word: puzzle_word.to_lowercase(),
        });
    }
    is_original(candidate, puzzle_word, history)?;
    if !is_real(candidate, dictionary, locale) {
        return Err(Rejection::NotRecognised);
    }
    Ok(())
}
