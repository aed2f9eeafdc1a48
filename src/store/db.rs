use rusqlite::Connection;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::AppError;

/// Abre la base en `path`, creando el directorio padre si hace falta.
pub fn open_connection(path: &Path) -> Result<Connection, AppError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)?;
        }
    }
    Ok(Connection::open(path)?)
}

/// Initialize the grade DB (create file + tables + indexes). Idempotent.
pub fn init_db(path: &Path) -> Result<(), AppError> {
    let conn = open_connection(path)?;
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS sections (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            subject_id TEXT NOT NULL,
            course_number TEXT NOT NULL,
            course_title TEXT,
            instructor1 TEXT NOT NULL,
            year TEXT NOT NULL,
            semester TEXT NOT NULL,
            section_number TEXT NOT NULL,
            course_gpa REAL NOT NULL DEFAULT 0,
            grades_count INTEGER NOT NULL DEFAULT 0,
            grades_a INTEGER NOT NULL DEFAULT 0,
            grades_b INTEGER NOT NULL DEFAULT 0,
            grades_c INTEGER NOT NULL DEFAULT 0,
            grades_d INTEGER NOT NULL DEFAULT 0,
            grades_f INTEGER NOT NULL DEFAULT 0,
            grades_i INTEGER NOT NULL DEFAULT 0,
            grades_p INTEGER NOT NULL DEFAULT 0,
            grades_q INTEGER NOT NULL DEFAULT 0,
            grades_w INTEGER NOT NULL DEFAULT 0,
            grades_z INTEGER NOT NULL DEFAULT 0,
            grades_r INTEGER NOT NULL DEFAULT 0,
            UNIQUE (subject_id, course_number, instructor1, year, semester, section_number)
        );

        CREATE INDEX IF NOT EXISTS idx_sections_course ON sections (subject_id, course_number);
        CREATE INDEX IF NOT EXISTS idx_sections_instructor ON sections (instructor1);

        CREATE TABLE IF NOT EXISTS imports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            ts TEXT NOT NULL,
            source TEXT NOT NULL,
            received INTEGER NOT NULL,
            inserted INTEGER NOT NULL
        );",
    )?;
    debug!(path = %path.display(), "grade db ready");
    Ok(())
}
