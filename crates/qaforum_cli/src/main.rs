//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `qaforum_core` linkage against a real database.
//! - Print every question as list-style JSON for quick local inspection.
//!
//! # Configuration
//! - `QAFORUM_DB_PATH`: database file; in-memory when unset.
//! - `QAFORUM_LOG_DIR` / `QAFORUM_LOG_LEVEL`: optional file logging.

use log::error;
use qaforum_core::db::{open_db, open_db_in_memory};
use qaforum_core::{init_logging_with, LogConfig, QuestionService, SqliteForumRepository};
use std::error::Error;
use std::process::ExitCode;

const DB_PATH_ENV: &str = "QAFORUM_DB_PATH";

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("qaforum: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    if let Some(config) = LogConfig::from_env()? {
        init_logging_with(&config)?;
    }

    println!("qaforum_core version={}", qaforum_core::core_version());

    let conn = match std::env::var(DB_PATH_ENV) {
        Ok(path) => open_db(path)?,
        Err(_) => open_db_in_memory()?,
    };
    let service = QuestionService::new(SqliteForumRepository::try_new(&conn)?);
    let questions = service.get_all_questions()?;
    println!("{}", serde_json::to_string_pretty(&questions)?);
    Ok(())
}
