// Integration tests for the word-scramble application
// These tests verify that all modules work together correctly

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Cursor;
use word_scramble::cli::CliInterface;
use word_scramble::storage::{JsonFileStore, MemoryStore};
use word_scramble::*;

fn silkworm_game<S: KeyValueStore + 'static>(store: S) -> Game {
    Game::new(
        vec!["silkworm".to_string()],
        Box::new(store),
        Box::new(WordListDictionary::embedded()),
        "en",
        StdRng::seed_from_u64(11),
    )
}

#[test]
fn test_silkworm_session() {
    let mut game = silkworm_game(MemoryStore::new());
    game.new_game();
    assert_eq!(game.state().puzzle_word(), "silkworm");

    assert_eq!(game.submit("silk"), Ok(()));
    assert_eq!(game.state().guess_history()[0], "silk");

    assert_eq!(game.submit("silk"), Err(Rejection::AlreadyUsed));
    assert_eq!(game.submit("silkworm"), Err(Rejection::SameWord));
    assert!(game.submit("xyzzy").is_err());
    assert_eq!(game.state().guess_history(), ["silk"]);
}

#[test]
fn test_plurals_from_start_word_accepted() {
    let mut game = silkworm_game(MemoryStore::new());
    game.new_game();
    for word in ["owls", "rows", "oils", "lows", "mows", "mils", "worms", "rims"] {
        assert_eq!(game.submit(word), Ok(()), "{word}");
    }
    assert_eq!(game.state().guess_history()[0], "rims");
}

#[test]
fn test_short_words_never_accepted() {
    let mut game = silkworm_game(MemoryStore::new());
    game.new_game();
    assert_eq!(game.submit("ok"), Err(Rejection::NotRecognised));
    assert_eq!(game.submit(""), Err(Rejection::NotRecognised));
}

#[test]
fn test_unknown_word_not_recognised() {
    let mut game = silkworm_game(MemoryStore::new());
    game.new_game();
    // Spellable from silkworm but not in the dictionary.
    assert_eq!(game.submit("kliw"), Err(Rejection::NotRecognised));
}

#[test]
fn test_persist_then_restore_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    let mut game = silkworm_game(JsonFileStore::new(&path));
    game.new_game();
    game.submit("silk").unwrap();
    game.submit("worm").unwrap();
    game.submit("milk").unwrap();
    let before = game.state().clone();

    let mut relaunched = silkworm_game(JsonFileStore::new(&path));
    assert!(relaunched.resume_or_start());
    assert_eq!(relaunched.state(), &before);
    assert_eq!(relaunched.state().guess_history(), ["milk", "worm", "silk"]);

    // Guesses made before the relaunch still count as used.
    assert_eq!(relaunched.submit("worm"), Err(Rejection::AlreadyUsed));
}

#[test]
fn test_new_game_removes_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    let mut game = silkworm_game(JsonFileStore::new(&path));
    game.new_game();
    game.submit("silk").unwrap();
    assert!(load_snapshot(&JsonFileStore::new(&path)).is_some());

    game.new_game();
    assert!(game.state().guess_history().is_empty());
    assert_eq!(load_snapshot(&JsonFileStore::new(&path)), None);

    let mut relaunched = silkworm_game(JsonFileStore::new(&path));
    assert!(!relaunched.restore(load_snapshot(&JsonFileStore::new(&path))));
}

#[test]
fn test_corrupt_save_starts_fresh() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");
    std::fs::write(&path, "{\"puzzle_word\": \"\\\"silk").unwrap();

    let mut game = silkworm_game(JsonFileStore::new(&path));
    assert!(!game.resume_or_start());
    assert!(game.state().guess_history().is_empty());
}

#[test]
fn test_unwritable_save_keeps_playing() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the save file should be makes every write fail.
    let path = dir.path().join("save.json");
    std::fs::create_dir(&path).unwrap();

    let mut game = silkworm_game(JsonFileStore::new(&path));
    game.new_game();
    assert_eq!(game.submit("silk"), Ok(()));
    assert_eq!(game.state().guess_history(), ["silk"]);
}

#[test]
fn test_cli_game_loop_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("save.json");

    let mut game = silkworm_game(JsonFileStore::new(&path));
    let input = "silk\nSILK\nsilkworm\nxyzzy\n\nworm\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    game_loop(&mut game, &mut interface);

    assert_eq!(game.state().guess_history(), ["worm", "silk"]);
    let saved = load_snapshot(&JsonFileStore::new(&path)).unwrap();
    assert_eq!(saved.puzzle_word, "silkworm");
    assert_eq!(saved.guess_history, ["worm", "silk"]);
}

#[test]
fn test_cli_game_loop_survives_unreadable_line() {
    let mut game = silkworm_game(MemoryStore::new());
    let input: &[u8] = b"silk\n\xff\xfe\nworm\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    game_loop(&mut game, &mut interface);

    assert_eq!(game.state().guess_history(), ["worm", "silk"]);
}

#[test]
fn test_cli_game_loop_new_game_command() {
    let mut game = silkworm_game(MemoryStore::new());
    let input = "silk\nnew\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    game_loop(&mut game, &mut interface);

    assert!(game.state().guess_history().is_empty());
}

#[test]
fn test_cli_game_loop_stops_at_end_of_input() {
    let mut game = silkworm_game(MemoryStore::new());
    let mut interface = CliInterface::new(Cursor::new("silk\n"));
    game_loop(&mut game, &mut interface);

    assert_eq!(game.state().guess_history(), ["silk"]);
}

#[test]
fn test_custom_wordbank_file_to_game() {
    use std::io::Write;

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Mountain").unwrap();
    writeln!(file, "notebook").unwrap();

    let words = load_wordbank_from_file(file.path()).unwrap();
    let mut game = Game::new(
        words.clone(),
        Box::new(MemoryStore::new()),
        Box::new(WordListDictionary::embedded()),
        "en",
        StdRng::seed_from_u64(3),
    );
    for _ in 0..10 {
        game.new_game();
        assert!(words.contains(&game.state().puzzle_word().to_string()));
    }
}

#[test]
fn test_injected_dictionary_and_locale() {
    let oracle = |word: &str, locale: &str| locale == "fr" && word == "mois";
    let mut game = Game::new(
        vec!["moisson".to_string()],
        Box::new(MemoryStore::new()),
        Box::new(oracle),
        "fr",
        StdRng::seed_from_u64(5),
    );
    game.new_game();
    assert_eq!(game.submit("mois"), Ok(()));
    assert_eq!(game.submit("son"), Err(Rejection::NotRecognised));
}
