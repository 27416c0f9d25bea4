//! SQLite implementation of the Store trait.
//!
//! This is the primary storage backend for the halaltrace ledger. It uses
//! rusqlite with bundled SQLite; the paired batch/history write paths run
//! inside explicit transactions so each ledger operation commits all or
//! nothing.

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use halaltrace_core::{AccountId, Batch, BatchId, BatchStatus, CertHash, HistoryEntry};
use halaltrace_roles::Role;

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{InsertResult, Store};

/// SQLite-based store implementation.
///
/// Thread-safe via an internal Mutex; the host serializes state-changing
/// calls, so the lock only arbitrates concurrent readers.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute an operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock().map_err(|e| {
            StoreError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                Some(format!("mutex poisoned: {}", e)),
            ))
        })?;
        f(&conn)
    }

    /// Execute an operation that needs mutable access (transactions).
    fn with_conn_mut<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock().map_err(|e| {
            StoreError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
                Some(format!("mutex poisoned: {}", e)),
            ))
        })?;
        f(&mut conn)
    }
}

// Helper to convert an account blob column
fn account_from_blob(bytes: Vec<u8>, idx: usize, col: &str) -> rusqlite::Result<AccountId> {
    AccountId::try_from(bytes.as_slice()).map_err(|_| {
        rusqlite::Error::InvalidColumnType(idx, col.into(), rusqlite::types::Type::Blob)
    })
}

// Helper to convert a row to Batch
fn row_to_batch(row: &rusqlite::Row<'_>) -> rusqlite::Result<Batch> {
    let producer_bytes: Vec<u8> = row.get("producer")?;
    let owner_bytes: Vec<u8> = row.get("current_owner")?;
    let status: String = row.get("status")?;
    let cert: Option<String> = row.get("halal_cert_hash")?;

    Ok(Batch {
        batch_id: BatchId::new(row.get::<_, String>("batch_id")?),
        product_name: row.get("product_name")?,
        producer: account_from_blob(producer_bytes, 2, "producer")?,
        current_owner: account_from_blob(owner_bytes, 3, "current_owner")?,
        status: BatchStatus::from(status),
        halal_cert_hash: cert.map(CertHash::new),
        created_at: row.get("created_at")?,
    })
}

// Helper to convert a row to HistoryEntry
fn row_to_history_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let status: String = row.get("status")?;
    let updated_by_bytes: Vec<u8> = row.get("updated_by")?;

    Ok(HistoryEntry {
        status: BatchStatus::from(status),
        timestamp: row.get("timestamp")?,
        updated_by: account_from_blob(updated_by_bytes, 1, "updated_by")?,
    })
}

impl Store for SqliteStore {
    fn insert_batch(&self, batch: &Batch, entry: &HistoryEntry) -> Result<InsertResult> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let taken: Option<i64> = tx
                .query_row(
                    "SELECT 1 FROM batches WHERE batch_id = ?1",
                    params![batch.batch_id.as_str()],
                    |row| row.get(0),
                )
                .optional()?;

            if taken.is_some() {
                return Ok(InsertResult::AlreadyExists);
            }

            let created_seq: i64 = tx.query_row(
                "SELECT COALESCE(MAX(created_seq), 0) + 1 FROM batches",
                [],
                |row| row.get(0),
            )?;

            tx.execute(
                "INSERT INTO batches (
                    batch_id, product_name, producer, current_owner, status,
                    halal_cert_hash, created_at, created_seq
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    batch.batch_id.as_str(),
                    batch.product_name,
                    batch.producer.as_bytes().as_slice(),
                    batch.current_owner.as_bytes().as_slice(),
                    batch.status.as_str(),
                    batch.halal_cert_hash.as_ref().map(|h| h.as_str()),
                    batch.created_at,
                    created_seq,
                ],
            )?;

            tx.execute(
                "INSERT INTO history (batch_id, seq, status, updated_by, timestamp)
                 VALUES (?1, 1, ?2, ?3, ?4)",
                params![
                    batch.batch_id.as_str(),
                    entry.status.as_str(),
                    entry.updated_by.as_bytes().as_slice(),
                    entry.timestamp,
                ],
            )?;

            tx.commit()?;
            Ok(InsertResult::Inserted)
        })
    }

    fn update_batch(&self, batch: &Batch, entry: Option<&HistoryEntry>) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let updated = tx.execute(
                "UPDATE batches
                 SET current_owner = ?2, status = ?3, halal_cert_hash = ?4
                 WHERE batch_id = ?1",
                params![
                    batch.batch_id.as_str(),
                    batch.current_owner.as_bytes().as_slice(),
                    batch.status.as_str(),
                    batch.halal_cert_hash.as_ref().map(|h| h.as_str()),
                ],
            )?;

            if updated == 0 {
                return Err(StoreError::MissingBatch(batch.batch_id.to_string()));
            }

            if let Some(entry) = entry {
                let seq: i64 = tx.query_row(
                    "SELECT COALESCE(MAX(seq), 0) + 1 FROM history WHERE batch_id = ?1",
                    params![batch.batch_id.as_str()],
                    |row| row.get(0),
                )?;

                tx.execute(
                    "INSERT INTO history (batch_id, seq, status, updated_by, timestamp)
                     VALUES (?1, ?2, ?3, ?4, ?5)",
                    params![
                        batch.batch_id.as_str(),
                        seq,
                        entry.status.as_str(),
                        entry.updated_by.as_bytes().as_slice(),
                        entry.timestamp,
                    ],
                )?;
            }

            tx.commit()?;
            Ok(())
        })
    }

    fn get_batch(&self, id: &BatchId) -> Result<Option<Batch>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT batch_id, product_name, producer, current_owner, status,
                        halal_cert_hash, created_at
                 FROM batches WHERE batch_id = ?1",
                params![id.as_str()],
                row_to_batch,
            )
            .optional()
            .map_err(StoreError::from)
        })
    }

    fn has_batch(&self, id: &BatchId) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM batches WHERE batch_id = ?1",
                    params![id.as_str()],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    fn batch_count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM batches", [], |row| row.get(0))?;
            Ok(count as u64)
        })
    }

    fn list_batch_ids(&self) -> Result<Vec<BatchId>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT batch_id FROM batches ORDER BY created_seq")?;
            let ids = stmt
                .query_map([], |row| row.get::<_, String>(0))?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(ids.into_iter().map(BatchId::new).collect())
        })
    }

    fn list_batch_ids_by_owner(&self, owner: &AccountId) -> Result<Vec<BatchId>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT batch_id FROM batches WHERE current_owner = ?1 ORDER BY created_seq",
            )?;
            let ids = stmt
                .query_map(params![owner.as_bytes().as_slice()], |row| {
                    row.get::<_, String>(0)
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(ids.into_iter().map(BatchId::new).collect())
        })
    }

    fn history(&self, id: &BatchId) -> Result<Vec<HistoryEntry>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT status, updated_by, timestamp
                 FROM history WHERE batch_id = ?1 ORDER BY seq",
            )?;
            let entries = stmt
                .query_map(params![id.as_str()], row_to_history_entry)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(entries)
        })
    }

    fn history_len(&self, id: &BatchId) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM history WHERE batch_id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )?;
            Ok(count as u64)
        })
    }

    fn admin(&self) -> Result<Option<AccountId>> {
        self.with_conn(|conn| {
            let bytes: Option<Vec<u8>> = conn
                .query_row("SELECT account FROM admin WHERE id = 0", [], |row| {
                    row.get(0)
                })
                .optional()?;

            match bytes {
                Some(b) => {
                    let account = AccountId::try_from(b.as_slice()).map_err(|_| {
                        StoreError::InvalidData("admin account is not 32 bytes".into())
                    })?;
                    Ok(Some(account))
                }
                None => Ok(None),
            }
        })
    }

    fn init_admin(&self, admin: &AccountId) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let existing: Option<Vec<u8>> = tx
                .query_row("SELECT account FROM admin WHERE id = 0", [], |row| {
                    row.get(0)
                })
                .optional()?;

            if existing.is_some() {
                return Err(StoreError::AdminAlreadySet);
            }

            tx.execute(
                "INSERT INTO admin (id, account) VALUES (0, ?1)",
                params![admin.as_bytes().as_slice()],
            )?;

            tx.commit()?;
            Ok(())
        })
    }

    fn grant_role(&self, role: Role, account: &AccountId) -> Result<()> {
        self.with_conn(|conn| {
            require_initialized(conn)?;
            conn.execute(
                "INSERT OR IGNORE INTO role_members (role, account) VALUES (?1, ?2)",
                params![role.to_u8(), account.as_bytes().as_slice()],
            )?;
            Ok(())
        })
    }

    fn revoke_role(&self, role: Role, account: &AccountId) -> Result<()> {
        self.with_conn(|conn| {
            require_initialized(conn)?;
            conn.execute(
                "DELETE FROM role_members WHERE role = ?1 AND account = ?2",
                params![role.to_u8(), account.as_bytes().as_slice()],
            )?;
            Ok(())
        })
    }

    fn has_role(&self, role: Role, account: &AccountId) -> Result<bool> {
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM role_members WHERE role = ?1 AND account = ?2",
                    params![role.to_u8(), account.as_bytes().as_slice()],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }

    fn roles_of(&self, account: &AccountId) -> Result<Vec<Role>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT role FROM role_members WHERE account = ?1 ORDER BY role",
            )?;
            let tags = stmt
                .query_map(params![account.as_bytes().as_slice()], |row| {
                    row.get::<_, u8>(0)
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            tags.into_iter()
                .map(|t| {
                    Role::from_u8(t)
                        .ok_or_else(|| StoreError::InvalidData(format!("unknown role tag {t}")))
                })
                .collect()
        })
    }
}

/// Registry mutations require the admin row to exist.
fn require_initialized(conn: &Connection) -> Result<()> {
    let found: Option<i64> = conn
        .query_row("SELECT 1 FROM admin WHERE id = 0", [], |row| row.get(0))
        .optional()?;
    if found.is_none() {
        return Err(StoreError::Uninitialized);
    }
    Ok(())
}
