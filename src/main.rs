use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;
use word_scramble::cli::{Cli, CliInterface, parse_cli};
use word_scramble::dictionary::{Dictionary, WordListDictionary};
use word_scramble::storage::{self, JsonFileStore, KeyValueStore, MemoryStore};
use word_scramble::tui::TuiInterface;
use word_scramble::wordbank::{
    EMBEDDED_START_WORDS, load_wordbank_from_file, load_wordbank_from_str,
};
use word_scramble::{Game, game_loop, logging};

fn load_start_words(cli: &Cli) -> Vec<String> {
    if let Some(path) = &cli.wordbank_path {
        match load_wordbank_from_file(path) {
            Ok(words) => return words,
            Err(e) => log::warn!("Failed to load start words from '{path}': {e}"),
        }
    }
    load_wordbank_from_str(EMBEDDED_START_WORDS)
}

fn load_dictionary(cli: &Cli) -> Box<dyn Dictionary> {
    if let Some(path) = &cli.dictionary_path {
        match WordListDictionary::from_file(&cli.locale, path) {
            Ok(dict) => {
                log::info!("Loaded {} dictionary words from '{path}'", dict.len());
                return Box::new(dict);
            }
            Err(e) => log::warn!("Failed to load dictionary from '{path}': {e}"),
        }
    }
    Box::new(WordListDictionary::embedded())
}

fn open_store(cli: &Cli) -> Box<dyn KeyValueStore> {
    if cli.no_save {
        return Box::new(MemoryStore::new());
    }
    match cli.save_file.clone().or_else(storage::default_save_path) {
        Some(path) => {
            let store = JsonFileStore::new(path);
            log::info!("Saving progress to {}", store.path().display());
            Box::new(store)
        }
        None => {
            log::warn!("No data directory available; progress will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

fn main() -> ExitCode {
    let cli = parse_cli();
    if let Err(e) = logging::init(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return ExitCode::FAILURE;
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut game = Game::new(
        load_start_words(&cli),
        open_store(&cli),
        load_dictionary(&cli),
        &cli.locale,
        rng,
    );

    if cli.tui {
        match TuiInterface::new() {
            Ok(mut interface) => game_loop(&mut game, &mut interface),
            Err(e) => {
                eprintln!("Failed to start terminal interface: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let mut interface = CliInterface::new(io::stdin().lock());
        game_loop(&mut game, &mut interface);
    }
    ExitCode::SUCCESS
}
