use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

use crate::models::{Task, TaskPatch};

/// SQLite store behind the reference `/todos` server.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self, String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
            }
        }
        let conn = Connection::open(path).map_err(|e| format!("failed to open database: {e}"))?;

        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| format!("failed to set pragmas: {e}"))?;

        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self, String> {
        let conn =
            Connection::open_in_memory().map_err(|e| format!("failed to open database: {e}"))?;
        let db = Database { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Create the schema if it doesn't exist.
    pub fn migrate(&self) -> Result<(), String> {
        self.conn
            .execute_batch(
                "
            CREATE TABLE IF NOT EXISTS todos (
                seq        INTEGER PRIMARY KEY AUTOINCREMENT,
                id         TEXT NOT NULL UNIQUE,
                text       TEXT NOT NULL,
                checked    INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
            )
            .map_err(|e| format!("migration failed: {e}"))
    }

    /// Generate a fresh task id.
    pub fn generate_id(&self) -> String {
        let uuid = uuid::Uuid::new_v4();
        format!("{:032x}", uuid.as_u128())[..12].to_string()
    }

    /// All tasks in creation order.
    pub fn list_tasks(&self) -> Result<Vec<Task>, String> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, text, checked FROM todos ORDER BY seq")
            .map_err(|e| format!("query error: {e}"))?;
        let rows = stmt
            .query_map([], row_to_task)
            .map_err(|e| format!("query error: {e}"))?;
        rows.collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("query error: {e}"))
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>, String> {
        self.conn
            .query_row(
                "SELECT id, text, checked FROM todos WHERE id = ?1",
                params![id],
                row_to_task,
            )
            .optional()
            .map_err(|e| format!("query error: {e}"))
    }

    pub fn insert_task(&self, text: &str, checked: bool) -> Result<Task, String> {
        let id = self.generate_id();
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT INTO todos (id, text, checked, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?4)",
                params![id, text, checked, now],
            )
            .map_err(|e| format!("failed to insert task: {e}"))?;
        Ok(Task {
            id,
            text: text.to_string(),
            checked,
        })
    }

    /// Apply the fields present in `patch`. Returns the updated task, or
    /// `None` if no task has that id.
    pub fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, String> {
        let now = Utc::now().to_rfc3339();
        let changed = self
            .conn
            .execute(
                "UPDATE todos
                 SET text = COALESCE(?2, text),
                     checked = COALESCE(?3, checked),
                     updated_at = ?4
                 WHERE id = ?1",
                params![id, patch.text, patch.checked, now],
            )
            .map_err(|e| format!("failed to update task: {e}"))?;
        if changed == 0 {
            return Ok(None);
        }
        self.get_task(id)
    }

    /// Returns whether a task was removed.
    pub fn delete_task(&self, id: &str) -> Result<bool, String> {
        let removed = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])
            .map_err(|e| format!("failed to delete task: {e}"))?;
        Ok(removed > 0)
    }
}

fn row_to_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        checked: row.get(2)?,
    })
}
