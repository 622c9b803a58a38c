use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_START_WORDS: &str = include_str!("resources/start.txt");

/// Puzzle word used when no start list is available.
pub const FALLBACK_WORD: &str = "silkworm";

/// Trims and lowercases one list entry. Blank or non-alphabetic entries
/// are dropped.
pub fn normalize_word(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    (!word.is_empty() && word.chars().all(|c| c.is_alphabetic())).then_some(word)
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_word).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_word(&line?) {
            words.push(word);
        }
    }
    Ok(words)
}

/// Returns `words`, or the single fallback word when it is empty.
pub fn words_or_fallback(words: Vec<String>) -> Vec<String> {
    if words.is_empty() {
        vec![FALLBACK_WORD.to_string()]
    } else {
        words
    }
}
