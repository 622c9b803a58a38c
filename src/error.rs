use thiserror::Error;

/// Why a submitted word was turned down.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("You can't spell that word from {puzzle_word}")]
    NotPossible { puzzle_word: String },
    #[error("You cannot use the original word to gain points.")]
    SameWord,
    #[error("Be more original!")]
    AlreadyUsed,
    #[error("You can't just make them up, you know!")]
    NotRecognised,
}

impl Rejection {
    /// Short heading shown above the message.
    pub fn title(&self) -> &'static str {
        match self {
            Rejection::NotPossible { .. } => "Word not possible",
            Rejection::SameWord => "Same word",
            Rejection::AlreadyUsed => "Word used already",
            Rejection::NotRecognised => "Word not recognised",
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}
