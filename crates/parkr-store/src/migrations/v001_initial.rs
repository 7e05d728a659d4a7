//! v001 -- Initial schema creation.
//!
//! A single `kv` table: every entity collection is one row whose value is
//! the collection serialized as a JSON array.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key        TEXT PRIMARY KEY NOT NULL,   -- e.g. parkr_v1_users
    value      TEXT NOT NULL,               -- JSON array
    updated_at TEXT NOT NULL                -- RFC-3339
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
