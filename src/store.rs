// SQLite access to the tools catalog
//
// The catalog lives in a `tools` table (id, name, description, category).
// The classifier itself never touches storage; this module exists for the
// migration and stats commands that read rows and write resolved
// categories back.

use crate::migration::PlannedUpdate;
use crate::models::ToolRecord;
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open tools database at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Default catalog location under the user's data directory.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aidex")
        .join("tools.db")
}

pub struct ToolStore {
    conn: Connection,
}

impl ToolStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the tools table if the database is fresh.
    pub fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS tools (
                id          INTEGER PRIMARY KEY,
                name        TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                category    TEXT
            );",
        )?;
        Ok(())
    }

    pub fn insert(&self, record: &ToolRecord) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO tools (name, description, category) VALUES (?1, ?2, ?3)",
            params![record.name, record.description, record.category],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch every row, ordered by id for reproducible migration plans.
    pub fn fetch_all(&self) -> Result<Vec<ToolRecord>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description, category FROM tools ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(ToolRecord {
                id: Some(row.get(0)?),
                name: row.get(1)?,
                description: row.get(2)?,
                category: row.get(3)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Apply planned category updates in a single transaction.
    ///
    /// Returns the number of rows actually changed.
    pub fn apply(&mut self, updates: &[PlannedUpdate]) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let mut changed = 0;
        {
            let mut stmt = tx.prepare("UPDATE tools SET category = ?1 WHERE id = ?2")?;
            for update in updates {
                changed += stmt.execute(params![update.resolved.label(), update.id])?;
            }
        }
        tx.commit()?;
        info!("Applied {} category updates", changed);
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::Category;

    fn seeded_store() -> ToolStore {
        let store = ToolStore::open_in_memory().unwrap();
        store.init_schema().unwrap();
        store
            .insert(&ToolRecord::new("ChatGPT Writer", "AI writing assistant").with_category("AI Writing"))
            .unwrap();
        store
            .insert(&ToolRecord::new("GitHub Copilot", "AI pair programmer for coding"))
            .unwrap();
        store
    }

    #[test]
    fn test_roundtrip() {
        let store = seeded_store();
        let records = store.fetch_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, Some(1));
        assert_eq!(records[0].category.as_deref(), Some("AI Writing"));
        assert_eq!(records[1].category, None);
    }

    #[test]
    fn test_apply_updates() {
        let mut store = seeded_store();
        let updates = vec![PlannedUpdate {
            id: 1,
            name: "ChatGPT Writer".to_string(),
            stored: Some("AI Writing".to_string()),
            resolved: Category::Writing,
        }];

        let changed = store.apply(&updates).unwrap();
        assert_eq!(changed, 1);

        let records = store.fetch_all().unwrap();
        assert_eq!(records[0].category.as_deref(), Some("Writing & Content"));
    }

    #[test]
    fn test_migration_cycle_converges() {
        use crate::migration;

        let mut store = seeded_store();
        store
            .insert(&ToolRecord::new("Mystery", "does things").with_category("weird label"))
            .unwrap();

        let plan = migration::plan(&store.fetch_all().unwrap());
        assert!(!plan.is_noop());
        store.apply(&plan.updates).unwrap();

        // Everything is canonical now; a second plan finds nothing to do.
        let replanned = migration::plan(&store.fetch_all().unwrap());
        assert!(replanned.is_noop(), "leftover updates: {:?}", replanned.updates);
    }

    #[test]
    fn test_open_missing_parent_dir_fails() {
        let err = ToolStore::open(Path::new("/nonexistent/dir/tools.db"));
        assert!(matches!(err, Err(StoreError::Open { .. })));
    }
}
