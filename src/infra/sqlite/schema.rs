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
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS account (
            user_id      INTEGER PRIMARY KEY,
            user_name    TEXT NOT NULL,
            email        TEXT,
            phonenumber  TEXT,
            role_name    TEXT,
            agency_name  TEXT,
            status       TEXT NOT NULL DEFAULT '0',
            create_time  TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_account_user_name
            ON account(user_name);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
