use crate::wordbank::normalize_word;
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub const DEFAULT_LOCALE: &str = "en";

pub const EMBEDDED_DICTIONARY: &str = include_str!("resources/dictionary.txt");

/// Spell-check oracle. Answers whether `word` is a real word in `locale`.
pub trait Dictionary {
    fn is_real_word(&self, word: &str, locale: &str) -> bool;
}

impl<F> Dictionary for F
where
    F: Fn(&str, &str) -> bool,
{
    fn is_real_word(&self, word: &str, locale: &str) -> bool {
        self(word, locale)
    }
}

/// A fixed set of known words for a single locale.
///
/// With inflections enabled the list is treated as stems: a word that is
/// not listed still counts when it is a regular plural or verb form of a
/// listed one ("owls", "rimmed", "baking").
#[derive(Debug, Clone)]
pub struct WordListDictionary {
    locale: String,
    words: HashSet<String>,
    inflections: bool,
}

impl WordListDictionary {
    pub fn from_words(locale: &str, data: &str) -> Self {
        let words = data.lines().filter_map(normalize_word).collect();
        Self {
            locale: locale.to_lowercase(),
            words,
            inflections: false,
        }
    }

    pub fn from_file<P: AsRef<Path>>(locale: &str, path: P) -> io::Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut words = HashSet::new();
        for line in reader.lines() {
            if let Some(word) = normalize_word(&line?) {
                words.insert(word);
            }
        }
        Ok(Self {
            locale: locale.to_lowercase(),
            words,
            inflections: false,
        })
    }

    /// The built-in English stem list, with inflections.
    pub fn embedded() -> Self {
        Self::from_words(DEFAULT_LOCALE, EMBEDDED_DICTIONARY).with_inflections(true)
    }

    #[must_use]
    pub fn with_inflections(mut self, enabled: bool) -> Self {
        self.inflections = enabled;
        self
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Dictionary for WordListDictionary {
    fn is_real_word(&self, word: &str, locale: &str) -> bool {
        if !locale.eq_ignore_ascii_case(&self.locale) {
            return false;
        }
        let word = word.to_lowercase();
        if self.words.contains(&word) {
            return true;
        }
        self.inflections && inflection_stems(&word).iter().any(|stem| self.words.contains(stem))
    }
}

/// Candidate stems for a regular English inflection of `word`.
fn inflection_stems(word: &str) -> Vec<String> {
    let mut stems = Vec::new();
    if let Some(stem) = word.strip_suffix("ies") {
        stems.push(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("ied") {
        stems.push(format!("{stem}y"));
    }
    if let Some(stem) = word.strip_suffix("es") {
        stems.push(stem.to_string());
    }
    if let Some(stem) = word.strip_suffix('s')
        && !stem.ends_with('s')
    {
        stems.push(stem.to_string());
    }
    for suffix in ["ed", "ing", "er"] {
        let Some(stem) = word.strip_suffix(suffix) else {
            continue;
        };
        stems.push(stem.to_string());
        stems.push(format!("{stem}e"));
        // rimmed -> rim, stopping -> stop
        let mut chars = stem.chars().rev();
        if let (Some(last), Some(before)) = (chars.next(), chars.next())
            && last == before
        {
            stems.push(stem[..stem.len() - last.len_utf8()].to_string());
        }
    }
    stems.retain(|stem| stem.chars().count() >= 2);
    stems
}
