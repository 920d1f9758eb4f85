//! CLI smoke check.
//!
//! # Responsibility
//! - Wire config, logging, SQLite storage and the task store end to end.
//! - Print the projected list for an optional `[sort] [filter]` pair.

use log::info;
use std::process::ExitCode;
use taskpad_core::{
    core_version, init_logging, AppConfig, FilterOption, SortOption, SqliteKvStore, StoreOptions,
    TaskStore,
};

fn main() -> ExitCode {
    match run(std::env::args().skip(1).collect()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("taskpad: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Vec<String>) -> Result<(), String> {
    let sort = match args.first() {
        Some(raw) => raw.parse::<SortOption>().map_err(|err| err.to_string())?,
        None => SortOption::default(),
    };
    let filter = match args.get(1) {
        Some(raw) => raw.parse::<FilterOption>().map_err(|err| err.to_string())?,
        None => FilterOption::default(),
    };

    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, &log_dir.to_string_lossy())?;
    }
    info!("event=cli_start module=cli status=ok sort={sort} filter={filter}");

    let kv = SqliteKvStore::open(&config.db_path).map_err(|err| err.to_string())?;
    let store = TaskStore::initialize_with(
        kv,
        StoreOptions {
            storage_key: config.storage_key.clone(),
            ..StoreOptions::default()
        },
    );

    println!("taskpad_core version={}", core_version());
    println!("db_path={} key={}", config.db_path.display(), store.storage_key());
    if let Some(warning) = store.load_warning() {
        println!("warning={warning}");
    }

    let counts = store.counts();
    println!("total={} active={}", counts.total, counts.active);
    for task in store.project(sort, filter) {
        let mark = if task.is_completed() { 'x' } else { ' ' };
        println!("[{mark}] {} {}", task.id(), task.text());
    }
    Ok(())
}
