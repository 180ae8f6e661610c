//! Low-level database operations and schema management.

pub use crate::errors::DatabaseError;
use crate::proteome::ReferenceProteome;
use crate::simulation::AggregateResult;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// One persisted run: the aggregate result plus its sink-assigned identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique run id, assigned at insert time
    pub run_id: String,
    /// Unix timestamp of the insert, seconds
    pub created_at: i64,
    /// The aggregate result as produced by the engine
    pub result: AggregateResult,
}

/// SQLite-backed run store.
///
/// Each completed run is one row in `runs`, keyed by a fresh uuid so
/// concurrent runs with identical parameters never overwrite each other.
/// The reference proteome used for a run is stored alongside it.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
    db_path: String,
}

impl Database {
    /// Open (or create) a database at the specified path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatabaseError> {
        let path_str = path.as_ref().to_string_lossy().to_string();
        let conn =
            Connection::open(&path_str).map_err(|e| DatabaseError::Connection(e.to_string()))?;

        conn.execute_batch(
            "PRAGMA synchronous = NORMAL;
             PRAGMA journal_mode = WAL;",
        )
        .map_err(|e| DatabaseError::Initialization(e.to_string()))?;

        let db = Self {
            conn,
            db_path: path_str,
        };

        db.initialize_schema()?;
        Ok(db)
    }

    /// Initialize database schema.
    fn initialize_schema(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS runs (
                    run_id TEXT PRIMARY KEY,
                    cutoff REAL NOT NULL,
                    crucial_prot REAL NOT NULL,
                    cv REAL NOT NULL,
                    seed INTEGER NOT NULL,
                    trials_requested INTEGER NOT NULL,
                    trials_completed INTEGER NOT NULL,
                    total_gametes INTEGER NOT NULL,
                    viable_gametes INTEGER NOT NULL,
                    viable_fraction REAL NOT NULL,
                    created_at INTEGER NOT NULL
                );

                -- Reference proteome used by each run, one row per protein
                CREATE TABLE IF NOT EXISTS reference_proteome (
                    run_id TEXT NOT NULL,
                    protein TEXT NOT NULL,
                    mean REAL NOT NULL,
                    PRIMARY KEY (run_id, protein)
                );

                CREATE INDEX IF NOT EXISTS idx_runs_params
                    ON runs(cutoff, crucial_prot);",
            )
            .map_err(|e| DatabaseError::Initialization(e.to_string()))?;

        Ok(())
    }

    /// Insert one run record and its reference proteome.
    ///
    /// Returns the freshly assigned run id.
    pub fn insert_run(
        &mut self,
        result: &AggregateResult,
        reference: &ReferenceProteome,
    ) -> Result<String, DatabaseError> {
        let run_id = Uuid::new_v4().to_string();
        let created_at = unix_now();

        let tx = self
            .conn
            .transaction()
            .map_err(|e| DatabaseError::Insert(e.to_string()))?;

        tx.execute(
            "INSERT INTO runs (run_id, cutoff, crucial_prot, cv, seed,
                               trials_requested, trials_completed,
                               total_gametes, viable_gametes, viable_fraction,
                               created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                run_id,
                result.cutoff,
                result.crucial_prot,
                result.cv,
                result.seed as i64,
                result.trials_requested as i64,
                result.trials_completed as i64,
                result.total_gametes as i64,
                result.viable_gametes as i64,
                result.viable_fraction(),
                created_at,
            ],
        )
        .map_err(|e| DatabaseError::Insert(e.to_string()))?;

        for (protein, mean) in reference.iter() {
            tx.execute(
                "INSERT INTO reference_proteome (run_id, protein, mean)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![run_id, protein.as_ref(), mean],
            )
            .map_err(|e| DatabaseError::Insert(e.to_string()))?;
        }

        tx.commit()
            .map_err(|e| DatabaseError::Insert(e.to_string()))?;

        Ok(run_id)
    }

    /// Fetch one run by id.
    pub fn get_run(&self, run_id: &str) -> Result<Option<RunRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT run_id, cutoff, crucial_prot, cv, seed,
                        trials_requested, trials_completed,
                        total_gametes, viable_gametes, created_at
                 FROM runs WHERE run_id = ?1",
            )
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let mut rows = stmt
            .query_map([run_id], row_to_record)
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        match rows.next() {
            Some(row) => Ok(Some(row.map_err(|e| DatabaseError::Query(e.to_string()))?)),
            None => Ok(None),
        }
    }

    /// List all runs, newest first.
    pub fn list_runs(&self) -> Result<Vec<RunRecord>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT run_id, cutoff, crucial_prot, cv, seed,
                        trials_requested, trials_completed,
                        total_gametes, viable_gametes, created_at
                 FROM runs ORDER BY created_at DESC, run_id",
            )
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let rows = stmt
            .query_map([], row_to_record)
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(|e| DatabaseError::Query(e.to_string()))?);
        }
        Ok(records)
    }

    /// Fetch the reference proteome stored for a run.
    pub fn get_reference(&self, run_id: &str) -> Result<Option<ReferenceProteome>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare("SELECT protein, mean FROM reference_proteome WHERE run_id = ?1")
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let rows = stmt
            .query_map([run_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| DatabaseError::Query(e.to_string()))?);
        }

        if entries.is_empty() {
            return Ok(None);
        }

        ReferenceProteome::new(entries)
            .map(Some)
            .map_err(|e| DatabaseError::Query(e.to_string()))
    }

    /// Get database path.
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Close the database and clean up WAL files.
    pub fn close(self) -> Result<(), DatabaseError> {
        if let Err(e) = self.conn.execute_batch(
            "PRAGMA wal_checkpoint(TRUNCATE);
             PRAGMA journal_mode = DELETE;",
        ) {
            eprintln!("Warning: failed to checkpoint/truncate WAL: {e}");
        }

        self.conn
            .close()
            .map_err(|(_conn, e)| DatabaseError::Close(e.to_string()))?;

        for suffix in &["-wal", "-shm"] {
            let fname = format!("{}{}", self.db_path, suffix);
            if let Err(e) = std::fs::remove_file(&fname) {
                if e.kind() != std::io::ErrorKind::NotFound {
                    eprintln!("Warning: failed to remove {fname}: {e}");
                }
            }
        }

        Ok(())
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<RunRecord> {
    Ok(RunRecord {
        run_id: row.get(0)?,
        created_at: row.get(9)?,
        result: AggregateResult {
            cutoff: row.get(1)?,
            crucial_prot: row.get(2)?,
            cv: row.get(3)?,
            seed: row.get::<_, i64>(4)? as u64,
            trials_requested: row.get::<_, i64>(5)? as usize,
            trials_completed: row.get::<_, i64>(6)? as usize,
            total_gametes: row.get::<_, i64>(7)? as u64,
            viable_gametes: row.get::<_, i64>(8)? as u64,
        },
    })
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_result(seed: u64) -> AggregateResult {
        AggregateResult {
            cutoff: 0.5,
            crucial_prot: 0.8,
            cv: 0.2,
            seed,
            trials_requested: 100,
            trials_completed: 100,
            total_gametes: 400,
            viable_gametes: 123,
        }
    }

    fn sample_reference() -> ReferenceProteome {
        ReferenceProteome::new([("A", 100.0), ("B", 50.0)]).unwrap()
    }

    #[test]
    fn test_database_insert_and_get() {
        let dir = tempdir().unwrap();
        let mut db = Database::open(dir.path().join("runs.db")).unwrap();

        let run_id = db.insert_run(&sample_result(42), &sample_reference()).unwrap();
        let record = db.get_run(&run_id).unwrap().unwrap();

        assert_eq!(record.run_id, run_id);
        assert_eq!(record.result, sample_result(42));
        assert!(record.created_at > 0);

        db.close().unwrap();
    }

    #[test]
    fn test_database_get_missing_run() {
        let dir = tempdir().unwrap();
        let db = Database::open(dir.path().join("runs.db")).unwrap();

        assert!(db.get_run("no-such-id").unwrap().is_none());
    }

    #[test]
    fn test_database_unique_run_ids() {
        let dir = tempdir().unwrap();
        let mut db = Database::open(dir.path().join("runs.db")).unwrap();

        // Identical parameters must not collide.
        let id1 = db.insert_run(&sample_result(42), &sample_reference()).unwrap();
        let id2 = db.insert_run(&sample_result(42), &sample_reference()).unwrap();

        assert_ne!(id1, id2);
        assert_eq!(db.list_runs().unwrap().len(), 2);
    }

    #[test]
    fn test_database_reference_round_trip() {
        let dir = tempdir().unwrap();
        let mut db = Database::open(dir.path().join("runs.db")).unwrap();

        let reference = sample_reference();
        let run_id = db.insert_run(&sample_result(42), &reference).unwrap();

        let stored = db.get_reference(&run_id).unwrap().unwrap();
        assert_eq!(stored, reference);
        assert!(db.get_reference("no-such-id").unwrap().is_none());
    }
}
