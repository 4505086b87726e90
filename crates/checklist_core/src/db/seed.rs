//! Default task seeding for fresh databases.

use super::DbResult;
use log::info;
use rusqlite::{params, Connection};

/// Tasks inserted into an empty store so a first launch is not blank.
///
/// Each entry is `(name, desc)`; all seeded tasks start incomplete.
pub const DEFAULT_TASKS: [(&str, &str); 3] = [
    ("TASK-1", "First task to complete"),
    ("TASK-2", "Second task to complete"),
    ("TASK-3", "Third task to complete"),
];

/// Inserts [`DEFAULT_TASKS`] when the `tasks` table has no rows.
///
/// Returns the number of inserted rows (0 when the table already had data).
pub fn seed_default_tasks(conn: &mut Connection) -> DbResult<usize> {
    let tx = conn.transaction()?;
    let existing: i64 = tx.query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))?;
    if existing > 0 {
        return Ok(0);
    }

    {
        let mut stmt = tx.prepare("INSERT INTO tasks (name, \"desc\", status) VALUES (?1, ?2, 0);")?;
        for (name, desc) in DEFAULT_TASKS {
            stmt.execute(params![name, desc])?;
        }
    }
    tx.commit()?;

    info!(
        "event=db_seed module=db status=ok inserted={}",
        DEFAULT_TASKS.len()
    );
    Ok(DEFAULT_TASKS.len())
}
