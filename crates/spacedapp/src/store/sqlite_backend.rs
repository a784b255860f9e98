//! SQLite persistence of a [`Snapshot`].
//!
//! Saving replaces every row inside one immediate transaction, and the
//! revision check happens inside that same transaction, so two writers can
//! never interleave.

use super::StorageBackend;
use crate::error::{Result, SpacedError};
use crate::model::{MasteryRecord, ReviewRecord, Snapshot};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::fs;
use std::path::{Path, PathBuf};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS intervals (
        item_id TEXT PRIMARY KEY,
        interval INTEGER NOT NULL,
        last_ts INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS mastery (
        subskill TEXT PRIMARY KEY,
        score_sum INTEGER NOT NULL,
        attempts INTEGER NOT NULL
    );
    CREATE TABLE IF NOT EXISTS meta (
        key TEXT PRIMARY KEY,
        value INTEGER NOT NULL
    );
";

pub struct SqliteBackend {
    path: PathBuf,
}

impl SqliteBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(conn)
    }

    fn corrupt(&self, reason: impl ToString) -> SpacedError {
        SpacedError::StoreCorrupt {
            location: self.location(),
            reason: reason.to_string(),
        }
    }

    fn write_failed(
        &self,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> SpacedError {
        SpacedError::StoreWrite {
            location: self.location(),
            source: source.into(),
        }
    }

    fn read_all(&self, conn: &Connection) -> Result<Snapshot> {
        let mut snapshot = Snapshot::new();

        {
            let mut stmt = conn.prepare("SELECT item_id, interval, last_ts FROM intervals")?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?;
            for row in rows {
                let (item_id, interval, last_ts) = row?;
                let interval = u64::try_from(interval)
                    .map_err(|_| self.corrupt(format!("negative interval for {}", item_id)))?;
                snapshot
                    .intervals
                    .insert(item_id, ReviewRecord::new(interval, last_ts));
            }
        }

        {
            let mut stmt = conn.prepare("SELECT subskill, score_sum, attempts FROM mastery")?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                ))
            })?;
            for row in rows {
                let (skill, score_sum, attempts) = row?;
                let record = match (u64::try_from(score_sum), u64::try_from(attempts)) {
                    (Ok(s), Ok(a)) => MasteryRecord::new(s, a),
                    _ => return Err(self.corrupt(format!("negative counters for {}", skill))),
                };
                snapshot.mastery.insert(skill, record);
            }
        }

        snapshot.revision = read_revision(conn)?;
        Ok(snapshot)
    }
}

fn read_revision(conn: &Connection) -> Result<u64> {
    let value: Option<i64> = conn
        .query_row("SELECT value FROM meta WHERE key = 'revision'", [], |row| {
            row.get(0)
        })
        .optional()?;
    Ok(value.map(|v| v.max(0) as u64).unwrap_or(0))
}

/// Replace every row with the snapshot's contents.
fn write_rows(conn: &Connection, snapshot: &Snapshot) -> Result<()> {
    conn.execute("DELETE FROM intervals", [])?;
    conn.execute("DELETE FROM mastery", [])?;

    let mut insert =
        conn.prepare("INSERT INTO intervals (item_id, interval, last_ts) VALUES (?1, ?2, ?3)")?;
    for (item_id, record) in &snapshot.intervals {
        insert.execute(params![
            item_id,
            to_sql_int(record.interval_seconds)?,
            record.last_reviewed_at
        ])?;
    }

    let mut insert =
        conn.prepare("INSERT INTO mastery (subskill, score_sum, attempts) VALUES (?1, ?2, ?3)")?;
    for (skill, record) in &snapshot.mastery {
        insert.execute(params![
            skill,
            to_sql_int(record.score_sum)?,
            to_sql_int(record.attempts)?
        ])?;
    }

    conn.execute(
        "INSERT OR REPLACE INTO meta (key, value) VALUES ('revision', ?1)",
        params![to_sql_int(snapshot.revision)?],
    )?;
    Ok(())
}

fn to_sql_int(value: u64) -> Result<i64> {
    i64::try_from(value).map_err(|_| SpacedError::Store(format!("{} does not fit in SQLite", value)))
}

impl StorageBackend for SqliteBackend {
    fn load_snapshot(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            return Ok(None);
        }
        // Anything SQLite cannot read back from an existing file is corruption.
        let conn = self.open().map_err(|e| self.corrupt(e))?;
        let snapshot = self.read_all(&conn).map_err(|e| match e {
            SpacedError::StoreCorrupt { .. } => e,
            other => self.corrupt(other),
        })?;
        Ok(Some(snapshot))
    }

    fn save_snapshot(&self, snapshot: &Snapshot, expected_revision: u64) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| self.write_failed(e))?;
            }
        }

        let mut conn = self.open().map_err(|e| self.write_failed(e))?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| self.write_failed(e))?;

        let found = read_revision(&tx).map_err(|e| self.write_failed(e))?;
        if found != expected_revision {
            return Err(SpacedError::Conflict {
                expected: expected_revision,
                found,
            });
        }

        write_rows(&tx, snapshot).map_err(|e| self.write_failed(e))?;
        tx.commit().map_err(|e| self.write_failed(e))?;

        Ok(())
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
