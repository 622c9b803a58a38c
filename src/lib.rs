// Library interface for word-scramble
// This allows integration tests to access internal modules

pub mod cli;
pub mod dictionary;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod storage;
pub mod tui;
pub mod validator;
pub mod wordbank;

// Re-export commonly used items for easier testing
pub use dictionary::{Dictionary, WordListDictionary};
pub use error::{Rejection, StoreError};
pub use game_state::{Game, GameInterface, GameState, PuzzleInfo, UserAction, game_loop};
pub use storage::{KeyValueStore, PersistedState, load_snapshot, save_snapshot};
pub use validator::{is_original, is_possible, is_real, validate};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};
