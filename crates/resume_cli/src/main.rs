//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `resume_core` linkage.
//! - Open a store (in memory, or the SQLite file given as the first
//!   argument) and report the loaded document's shape.

use resume_core::{DocumentStore, ListName, SqliteStorageRepository, StoreConfig};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("resume_core ping={}", resume_core::ping());
    println!("resume_core version={}", resume_core::core_version());

    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::default().with_db_path(path),
        None => StoreConfig::default().in_memory(),
    };
    let conn = match config.open_connection() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("resume_core store=error error={err}");
            return ExitCode::FAILURE;
        }
    };

    let store = DocumentStore::load_with_key(
        SqliteStorageRepository::new(&conn),
        config.storage_key.as_str(),
    );
    let document = store.document();
    for list in ListName::ALL {
        println!("resume_core {}={}", list, document.list_len(list));
    }

    match store.export_bytes() {
        Ok(bytes) => {
            println!("resume_core export_bytes={}", bytes.len());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("resume_core export=error error={err}");
            ExitCode::FAILURE
        }
    }
}
