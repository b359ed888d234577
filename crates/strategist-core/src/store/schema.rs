//! Database schema and initialization

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

/// Main database handle
pub struct Database {
    pub(crate) conn: Connection,
}

const SCHEMA_VERSION: i32 = 1;

const CREATE_TABLES: &str = r#"
-- Append-only strategy records. Column names are part of the external
-- contract: similarity search and by-id lookup must keep working against
-- previously written rows.
CREATE TABLE IF NOT EXISTS strategies (
    id TEXT PRIMARY KEY,
    product_name TEXT NOT NULL,
    target_users TEXT NOT NULL,
    goal TEXT NOT NULL,
    company_type TEXT NOT NULL,
    constraints TEXT NOT NULL,
    queries TEXT NOT NULL,
    raw_results TEXT NOT NULL,
    strategy_json TEXT NOT NULL,
    strategy_markdown TEXT NOT NULL,
    embedding BLOB NOT NULL,
    embedding_model TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_strategies_created_at
    ON strategies(created_at);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_info (
    version INTEGER PRIMARY KEY
);
"#;

impl Database {
    /// Open database at the given path, creating parent directories
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (tests)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Create tables and record the schema version
    pub fn initialize(&self) -> Result<()> {
        self.conn.execute_batch(CREATE_TABLES)?;
        self.conn.execute(
            "INSERT OR IGNORE INTO schema_info (version) VALUES (?1)",
            [SCHEMA_VERSION],
        )?;
        Ok(())
    }
}
