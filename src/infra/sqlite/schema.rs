use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS dataset (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL,
            source_path  TEXT NOT NULL,
            record_count INTEGER NOT NULL,
            imported_at  TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        );

        CREATE TABLE IF NOT EXISTS record_field (
            dataset_id  INTEGER NOT NULL,
            position    INTEGER NOT NULL,
            key         TEXT NOT NULL,
            PRIMARY KEY (dataset_id, position),
            UNIQUE (dataset_id, key),
            FOREIGN KEY (dataset_id) REFERENCES dataset(id)
        );

        CREATE TABLE IF NOT EXISTS record_value (
            dataset_id  INTEGER NOT NULL,
            record_idx  INTEGER NOT NULL,
            position    INTEGER NOT NULL,
            value       TEXT NOT NULL,
            PRIMARY KEY (dataset_id, record_idx, position),
            FOREIGN KEY (dataset_id, position) REFERENCES record_field(dataset_id, position)
        );

        CREATE INDEX IF NOT EXISTS idx_record_value_record
            ON record_value(dataset_id, record_idx);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
