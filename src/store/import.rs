use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use std::path::Path;

use tracing::info;

use crate::error::AppError;
use crate::models::SectionRecord;
use crate::store::db::open_connection;

/// Inserta registros de secciones. Las filas ya presentes (misma materia,
/// número, profesor, año, semestre y sección) se ignoran, así que reimportar
/// el mismo fichero no duplica datos. Devuelve cuántas filas se insertaron.
pub fn import_sections(db: &Path, records: &[SectionRecord], source: &str) -> Result<usize, AppError> {
    let mut conn = open_connection(db)?;
    let tx = conn.transaction()?;
    let mut inserted = 0usize;
    {
        let mut stmt = tx.prepare(
            "INSERT OR IGNORE INTO sections (
                subject_id, course_number, course_title, instructor1, year, semester,
                section_number, course_gpa, grades_count,
                grades_a, grades_b, grades_c, grades_d, grades_f, grades_i,
                grades_p, grades_q, grades_w, grades_z, grades_r
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
        )?;
        for r in records {
            let g = &r.grades;
            inserted += stmt.execute(params![
                r.subject_id.trim().to_uppercase(),
                r.course_number.trim(),
                r.course_title,
                r.instructor1.trim(),
                r.year,
                r.semester.trim(),
                r.section_number,
                r.course_gpa,
                r.grades_count,
                g.a, g.b, g.c, g.d, g.f, g.i, g.p, g.q, g.w, g.z, g.r,
            ])?;
        }
    }
    tx.execute(
        "INSERT INTO imports (ts, source, received, inserted) VALUES (?1, ?2, ?3, ?4)",
        params![Utc::now().to_rfc3339(), source, records.len() as i64, inserted as i64],
    )?;
    tx.commit()?;

    info!(source, received = records.len(), inserted, "imported sections");
    Ok(inserted)
}

/// Lee un fichero JSON (array de `SectionRecord`) y lo importa.
pub fn import_json_file(db: &Path, file: &Path) -> Result<usize, AppError> {
    let contents = std::fs::read_to_string(file)?;
    let records: Vec<SectionRecord> = serde_json::from_str(&contents)?;
    import_sections(db, &records, &file.display().to_string())
}

/// (ts, source, inserted) de la última importación, si hubo alguna.
pub fn last_import(db: &Path) -> Result<Option<(String, String, i64)>, AppError> {
    let conn = open_connection(db)?;
    let row = conn
        .query_row(
            "SELECT ts, source, inserted FROM imports ORDER BY id DESC LIMIT 1",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .optional()?;
    Ok(row)
}
