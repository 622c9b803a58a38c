use crate::dictionary::Dictionary;
use crate::error::Rejection;
use crate::storage::{self, KeyValueStore, PersistedState};
use crate::validator;
use crate::wordbank::{FALLBACK_WORD, words_or_fallback};
use crate::{debug_log, info_log};
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

/// What the player asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    NewGame,
    Exit,
}

/// Everything a front end needs to draw the current puzzle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleInfo {
    pub puzzle_word: String,
    pub guesses: Vec<String>,
    /// True when the game was picked up from a saved snapshot.
    pub resumed: bool,
}

/// Front end seam. `game_loop` drives any implementation of this.
pub trait GameInterface {
    fn display_puzzle(&mut self, info: &PuzzleInfo);
    /// `None` means the input was unusable and should be asked for again.
    fn read_action(&mut self) -> Option<UserAction>;
    fn display_accepted(&mut self, word: &str, guesses: &[String]);
    fn display_rejection(&mut self, rejection: &Rejection);
    fn display_new_game_message(&mut self, info: &PuzzleInfo);
    fn display_exit_message(&mut self);
}

/// The puzzle word and the accepted guesses, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    puzzle_word: String,
    guess_history: Vec<String>,
}

impl GameState {
    pub fn puzzle_word(&self) -> &str {
        &self.puzzle_word
    }

    pub fn guess_history(&self) -> &[String] {
        &self.guess_history
    }

    pub fn is_started(&self) -> bool {
        !self.puzzle_word.is_empty()
    }

    pub fn to_persisted(&self) -> PersistedState {
        PersistedState {
            puzzle_word: self.puzzle_word.clone(),
            guess_history: self.guess_history.clone(),
        }
    }
}

/// Uniform pick from `words`, or the fallback word when there are none.
pub fn pick_puzzle_word<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> String {
    words
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| FALLBACK_WORD.to_string())
}

/// A running game wired to its storage and dictionary.
pub struct Game {
    state: GameState,
    word_list: Vec<String>,
    store: Box<dyn KeyValueStore>,
    dictionary: Box<dyn Dictionary>,
    locale: String,
    rng: StdRng,
    resumed: bool,
}

impl Game {
    pub fn new(
        word_list: Vec<String>,
        store: Box<dyn KeyValueStore>,
        dictionary: Box<dyn Dictionary>,
        locale: &str,
        rng: StdRng,
    ) -> Self {
        Self {
            state: GameState::default(),
            word_list: words_or_fallback(word_list),
            store,
            dictionary,
            locale: locale.to_string(),
            rng,
            resumed: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn puzzle_info(&self) -> PuzzleInfo {
        PuzzleInfo {
            puzzle_word: self.state.puzzle_word.clone(),
            guesses: self.state.guess_history.clone(),
            resumed: self.resumed,
        }
    }

    /// Picks up the saved game if there is one, otherwise starts fresh.
    /// Returns true when a saved game was restored.
    pub fn resume_or_start(&mut self) -> bool {
        let saved = storage::load_snapshot(self.store.as_ref());
        if self.restore(saved) {
            return true;
        }
        self.new_game();
        false
    }

    /// Starts over with a random word from this game's list.
    pub fn new_game(&mut self) {
        let words = std::mem::take(&mut self.word_list);
        self.start_new_game(&words);
        self.word_list = words;
    }

    /// Picks a new puzzle word from `word_list`, clears the history and
    /// deletes the saved snapshot.
    pub fn start_new_game(&mut self, word_list: &[String]) {
        self.state.puzzle_word = pick_puzzle_word(word_list, &mut self.rng);
        self.state.guess_history.clear();
        self.resumed = false;
        if let Err(e) = storage::clear_snapshot(self.store.as_mut()) {
            log::warn!("Failed to remove saved game: {e}");
        }
        info_log!("New game started with '{}'", self.state.puzzle_word);
    }

    /// Loads a snapshot into the game. Returns false, leaving the game
    /// untouched, when there is nothing usable to load.
    pub fn restore(&mut self, persisted: Option<PersistedState>) -> bool {
        let Some(saved) = persisted else {
            debug_log!("restore() - No saved game");
            return false;
        };
        if saved.puzzle_word.is_empty() {
            debug_log!("restore() - Saved game has no puzzle word");
            return false;
        }
        info_log!(
            "Restored '{}' with {} guesses",
            saved.puzzle_word,
            saved.guess_history.len()
        );
        self.state.puzzle_word = saved.puzzle_word;
        self.state.guess_history = saved.guess_history;
        self.resumed = true;
        true
    }

    /// Prepends `word` to the history and saves. A failed save is logged
    /// and the game carries on in memory.
    pub fn record_guess(&mut self, word: String) {
        self.state.guess_history.insert(0, word);
        let snapshot = self.state.to_persisted();
        if let Err(e) = storage::save_snapshot(self.store.as_mut(), &snapshot) {
            log::warn!("Failed to save game: {e}");
        }
    }

    /// Checks a guess and records it if it passes.
    pub fn submit(&mut self, candidate: &str) -> Result<(), Rejection> {
        let answer = candidate.trim().to_lowercase();
        validator::validate(
            &answer,
            &self.state.puzzle_word,
            &self.state.guess_history,
            self.dictionary.as_ref(),
            &self.locale,
        )?;
        debug_log!("submit() - Accepted '{}'", answer);
        self.record_guess(answer);
        Ok(())
    }
}

pub fn game_loop<I: GameInterface + ?Sized>(game: &mut Game, interface: &mut I) {
    if !game.state().is_started() {
        game.resume_or_start();
    }
    interface.display_puzzle(&game.puzzle_info());

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                game.new_game();
                interface.display_new_game_message(&game.puzzle_info());
            }
            UserAction::Guess(word) => match game.submit(&word) {
                Ok(()) => {
                    let guesses = game.state().guess_history();
                    interface.display_accepted(&guesses[0], guesses);
                }
                Err(rejection) => {
                    debug_log!("game_loop() - Rejected '{}': {:?}", word, rejection);
                    interface.display_rejection(&rejection);
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn knows(words: &'static [&'static str]) -> Box<dyn Dictionary> {
        Box::new(move |word: &str, _locale: &str| words.iter().any(|w| *w == word))
    }

    fn game_with(word_list: &[&str], store: MemoryStore) -> Game {
        Game::new(
            word_list.iter().map(|w| w.to_string()).collect(),
            Box::new(store),
            knows(&["silk", "worm", "milk", "slim"]),
            "en",
            StdRng::seed_from_u64(7),
        )
    }

    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<Option<UserAction>>,
        accepted: Vec<String>,
        rejections: Vec<Rejection>,
        puzzles: Vec<PuzzleInfo>,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<Option<UserAction>>) -> Self {
            Self {
                actions: actions.into(),
                ..Default::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_puzzle(&mut self, info: &PuzzleInfo) {
            self.puzzles.push(info.clone());
        }

        fn read_action(&mut self) -> Option<UserAction> {
            self.actions.pop_front().unwrap_or(Some(UserAction::Exit))
        }

        fn display_accepted(&mut self, word: &str, _guesses: &[String]) {
            self.accepted.push(word.to_string());
        }

        fn display_rejection(&mut self, rejection: &Rejection) {
            self.rejections.push(rejection.clone());
        }

        fn display_new_game_message(&mut self, info: &PuzzleInfo) {
            self.puzzles.push(info.clone());
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }
    }

    #[test]
    fn test_pick_puzzle_word_fallback() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_puzzle_word(&[], &mut rng), FALLBACK_WORD);
    }

    #[test]
    fn test_pick_puzzle_word_from_list() {
        let words = vec!["umbrella".to_string(), "kangaroo".to_string()];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert!(words.contains(&pick_puzzle_word(&words, &mut rng)));
        }
    }

    #[test]
    fn test_empty_word_list_uses_fallback() {
        let mut game = game_with(&[], MemoryStore::new());
        game.new_game();
        assert_eq!(game.state().puzzle_word(), FALLBACK_WORD);
    }

    #[test]
    fn test_submit_records_most_recent_first() {
        let mut game = game_with(&["silkworm"], MemoryStore::new());
        game.new_game();
        game.submit("silk").unwrap();
        game.submit("worm").unwrap();
        assert_eq!(game.state().guess_history(), ["worm", "silk"]);
    }

    #[test]
    fn test_submit_normalizes_input() {
        let mut game = game_with(&["silkworm"], MemoryStore::new());
        game.new_game();
        game.submit("  SILK ").unwrap();
        assert_eq!(game.state().guess_history(), ["silk"]);
        assert_eq!(game.submit("Silk"), Err(Rejection::AlreadyUsed));
    }

    #[test]
    fn test_rejection_leaves_history_alone() {
        let mut game = game_with(&["silkworm"], MemoryStore::new());
        game.new_game();
        assert_eq!(game.submit("silkworm"), Err(Rejection::SameWord));
        assert_eq!(
            game.submit("ox"),
            Err(Rejection::NotPossible {
                puzzle_word: "silkworm".to_string()
            })
        );
        assert_eq!(game.submit("mil"), Err(Rejection::NotRecognised));
        assert!(game.state().guess_history().is_empty());
    }

    #[test]
    fn test_restore_none_leaves_state() {
        let mut game = game_with(&["silkworm"], MemoryStore::new());
        game.new_game();
        game.submit("silk").unwrap();
        let before = game.state().clone();
        assert!(!game.restore(None));
        assert_eq!(game.state(), &before);
    }

    #[test]
    fn test_restore_empty_word_rejected() {
        let mut game = game_with(&["silkworm"], MemoryStore::new());
        let bad = PersistedState {
            puzzle_word: String::new(),
            guess_history: vec!["silk".to_string()],
        };
        assert!(!game.restore(Some(bad)));
        assert!(!game.state().is_started());
    }

    #[test]
    fn test_resume_or_start_uses_saved_game() {
        let mut store = MemoryStore::new();
        let saved = PersistedState {
            puzzle_word: "silkworm".to_string(),
            guess_history: vec!["milk".to_string(), "silk".to_string()],
        };
        storage::save_snapshot(&mut store, &saved).unwrap();

        let mut game = game_with(&["umbrella"], store);
        assert!(game.resume_or_start());
        assert_eq!(game.state().to_persisted(), saved);
        assert!(game.puzzle_info().resumed);
    }

    #[test]
    fn test_resume_or_start_without_save_starts_fresh() {
        let mut game = game_with(&["umbrella"], MemoryStore::new());
        assert!(!game.resume_or_start());
        assert_eq!(game.state().puzzle_word(), "umbrella");
        assert!(!game.puzzle_info().resumed);
    }

    #[test]
    fn test_game_loop_scripted_session() {
        let mut game = game_with(&["silkworm"], MemoryStore::new());
        let mut interface = ScriptedInterface::new(vec![
            Some(UserAction::Guess("silk".to_string())),
            None,
            Some(UserAction::Guess("silk".to_string())),
            Some(UserAction::NewGame),
            Some(UserAction::Guess("worm".to_string())),
            Some(UserAction::Exit),
        ]);
        game_loop(&mut game, &mut interface);

        assert_eq!(interface.accepted, ["silk", "worm"]);
        assert_eq!(interface.rejections, [Rejection::AlreadyUsed]);
        assert_eq!(interface.puzzles.len(), 2);
        assert!(interface.puzzles[1].guesses.is_empty());
        assert!(interface.exited);
        assert_eq!(game.state().guess_history(), ["worm"]);
    }
}
