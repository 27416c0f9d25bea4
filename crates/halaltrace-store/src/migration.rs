//! Database schema migrations for SQLite.
//!
//! We use a simple versioned migration system. Each migration is a SQL string
//! that transforms the schema from version N to N+1.

use rusqlite::Connection;

use crate::error::{Result, StoreError};

/// Current schema version.
pub const CURRENT_VERSION: u32 = 1;

/// Initialize or migrate the database schema.
///
/// This function is idempotent - it can be called multiple times safely.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    // Create migrations table if it doesn't exist
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    // Get current version
    let current: u32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    // Apply migrations
    if current < CURRENT_VERSION {
        let tx = conn.transaction()?;

        for version in (current + 1)..=CURRENT_VERSION {
            tracing::debug!(version, "applying schema migration");
            apply_migration(&tx, version)?;

            tx.execute(
                "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
                rusqlite::params![version, now_millis()],
            )?;
        }

        tx.commit()?;
    }

    Ok(())
}

/// Apply a specific migration version.
fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
    match version {
        1 => apply_v1(conn),
        _ => Err(StoreError::Migration(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Migration v1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        -- The single admin identity, set once at initialization
        CREATE TABLE admin (
            id INTEGER PRIMARY KEY CHECK (id = 0),
            account BLOB NOT NULL               -- 32 bytes
        );

        -- Role membership: independent boolean sets per role
        CREATE TABLE role_members (
            role INTEGER NOT NULL,              -- Role as u8
            account BLOB NOT NULL,              -- 32 bytes
            PRIMARY KEY (role, account)
        );

        -- Batches table: current state of every batch ever created
        CREATE TABLE batches (
            batch_id TEXT PRIMARY KEY,
            product_name TEXT NOT NULL,
            producer BLOB NOT NULL,             -- 32 bytes, immutable
            current_owner BLOB NOT NULL,        -- 32 bytes
            status TEXT NOT NULL,
            halal_cert_hash TEXT,               -- NULL until certified
            created_at INTEGER NOT NULL,        -- host commit timestamp (Unix ms)
            created_seq INTEGER NOT NULL UNIQUE -- creation-order index, never reused
        );

        -- History log: append-only status records, one sequence per batch
        CREATE TABLE history (
            batch_id TEXT NOT NULL,
            seq INTEGER NOT NULL,               -- 1-indexed within the batch
            status TEXT NOT NULL,
            updated_by BLOB NOT NULL,           -- 32 bytes
            timestamp INTEGER NOT NULL,         -- host commit timestamp (Unix ms)
            PRIMARY KEY (batch_id, seq)
        );

        -- Indexes for common queries
        CREATE INDEX idx_batches_owner ON batches(current_owner);
        CREATE INDEX idx_batches_created_seq ON batches(created_seq);
        CREATE INDEX idx_history_batch ON history(batch_id, seq);
        "#,
    )?;

    Ok(())
}

/// Get current time in milliseconds.
///
/// Only used for migration bookkeeping; domain timestamps always come from
/// the host.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_creates_tables() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"admin".to_string()));
        assert!(tables.contains(&"role_members".to_string()));
        assert!(tables.contains(&"batches".to_string()));
        assert!(tables.contains(&"history".to_string()));
        assert!(tables.contains(&"schema_migrations".to_string()));
    }

    #[test]
    fn test_migration_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap(); // Should not error
        migrate(&mut conn).unwrap(); // Still should not error

        let version: u32 = conn
            .query_row(
                "SELECT MAX(version) FROM schema_migrations",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_admin_table_single_row() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();

        conn.execute(
            "INSERT INTO admin (id, account) VALUES (0, ?1)",
            [vec![1u8; 32]],
        )
        .unwrap();

        // The CHECK constraint rejects any second row.
        let second = conn.execute(
            "INSERT INTO admin (id, account) VALUES (1, ?1)",
            [vec![2u8; 32]],
        );
        assert!(second.is_err());
    }
}
