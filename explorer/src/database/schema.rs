//! Database schema definitions

pub const CREATE_BLOCKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS blocks (
    hash TEXT PRIMARY KEY,
    height INTEGER NOT NULL,
    timestamp INTEGER NOT NULL,
    difficulty REAL NOT NULL,
    created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
)
"#;

pub const CREATE_BLOCKS_HEIGHT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_blocks_height ON blocks(height)";

pub const CREATE_BLOCKS_TIMESTAMP_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_blocks_timestamp ON blocks(timestamp)";

/// Applied in order by `Database::migrate`; every statement is idempotent.
pub const SCHEMA: &[&str] = &[
    CREATE_BLOCKS_TABLE,
    CREATE_BLOCKS_HEIGHT_INDEX,
    CREATE_BLOCKS_TIMESTAMP_INDEX,
];
