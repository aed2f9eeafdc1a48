use rusqlite::{params, Row};
use std::path::Path;

use strsim::jaro_winkler;

use crate::error::AppError;
use crate::models::{GradeDistribution, SectionRecord, Suggestion};
use crate::normalize::{collapse_whitespace, parse_course_code};
use crate::store::db::open_connection;

const SECTION_COLUMNS: &str = "subject_id, course_number, course_title, instructor1, year, semester,
    section_number, course_gpa, grades_count,
    grades_a, grades_b, grades_c, grades_d, grades_f, grades_i,
    grades_p, grades_q, grades_w, grades_z, grades_r";

// Most recent first; inside a year Fall comes after Summer after Spring.
const SECTION_ORDER: &str = "ORDER BY CAST(year AS INTEGER) DESC,
    CASE LOWER(semester) WHEN 'fall' THEN 0 WHEN 'summer' THEN 1 WHEN 'spring' THEN 2 ELSE 3 END,
    section_number, id";

fn row_to_section(row: &Row<'_>) -> rusqlite::Result<SectionRecord> {
    Ok(SectionRecord {
        subject_id: row.get(0)?,
        course_number: row.get(1)?,
        course_title: row.get(2)?,
        instructor1: row.get(3)?,
        year: row.get(4)?,
        semester: row.get(5)?,
        section_number: row.get(6)?,
        course_gpa: row.get(7)?,
        grades_count: row.get(8)?,
        grades: GradeDistribution {
            a: row.get(9)?,
            b: row.get(10)?,
            c: row.get(11)?,
            d: row.get(12)?,
            f: row.get(13)?,
            i: row.get(14)?,
            p: row.get(15)?,
            q: row.get(16)?,
            w: row.get(17)?,
            z: row.get(18)?,
            r: row.get(19)?,
        },
    })
}

// `%` and `_` in user text must match literally.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Sugerencias para el autocompletado: primero cursos, luego profesores,
/// como mucho `limit` en total.
///
/// - cursos cuyo código ("CSE1310", sin espacios) empieza por la consulta, o
///   cuyo título la contiene
/// - profesores cuyo nombre contiene la consulta, ordenados por similitud
///   Jaro-Winkler con ella
pub fn suggest(db: &Path, query: &str, limit: usize) -> Result<Vec<Suggestion>, AppError> {
    let query = collapse_whitespace(query);
    if query.is_empty() || limit == 0 {
        return Ok(Vec::new());
    }
    let compact: String = query.chars().filter(|c| !c.is_whitespace()).collect();
    let conn = open_connection(db)?;

    let mut out: Vec<Suggestion> = Vec::new();

    let mut stmt = conn.prepare(
        "SELECT subject_id, course_number, MAX(course_title)
         FROM sections
         WHERE (subject_id || course_number) LIKE ?1 || '%' ESCAPE '\\'
            OR course_title LIKE '%' || ?2 || '%' ESCAPE '\\'
         GROUP BY subject_id, course_number
         ORDER BY subject_id, course_number
         LIMIT ?3",
    )?;
    let courses = stmt.query_map(params![escape_like(&compact), escape_like(&query), limit as i64], |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?, row.get::<_, Option<String>>(2)?))
    })?;
    for c in courses {
        let (subject, number, title) = c?;
        let text = match title {
            Some(t) if !t.trim().is_empty() => format!("{} {} - {}", subject, number, t.trim()),
            _ => format!("{} {}", subject, number),
        };
        out.push(Suggestion::course(text));
    }

    let remaining = limit.saturating_sub(out.len());
    if remaining > 0 {
        let mut stmt = conn.prepare(
            "SELECT DISTINCT instructor1 FROM sections WHERE instructor1 LIKE '%' || ?1 || '%' ESCAPE '\\'",
        )?;
        let rows = stmt.query_map(params![escape_like(&query)], |row| row.get::<_, String>(0))?;
        let needle = query.to_lowercase();
        let mut professors: Vec<(f64, String)> = Vec::new();
        for name in rows {
            let name = name?;
            let score = jaro_winkler(&needle, &name.to_lowercase());
            professors.push((score, name));
        }
        professors.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        out.extend(
            professors
                .into_iter()
                .take(remaining)
                .map(|(_, name)| Suggestion::professor(name)),
        );
    }

    Ok(out)
}

/// Historial completo de un curso. Acepta "CSE 1310", "cse1310" o
/// "CSE 1310 - Intro". Un texto que no es código de curso da lista vacía.
pub fn sections_for_course(db: &Path, course: &str) -> Result<Vec<SectionRecord>, AppError> {
    let Some((subject, number)) = parse_course_code(course) else {
        return Ok(Vec::new());
    };
    let conn = open_connection(db)?;
    let sql = format!(
        "SELECT {SECTION_COLUMNS} FROM sections WHERE subject_id = ?1 AND course_number = ?2 {SECTION_ORDER}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![subject, number], row_to_section)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Todas las secciones dictadas por un profesor (nombre exacto, sin
/// distinguir mayúsculas).
pub fn sections_for_professor(db: &Path, professor: &str) -> Result<Vec<SectionRecord>, AppError> {
    let name = collapse_whitespace(professor);
    if name.is_empty() {
        return Ok(Vec::new());
    }
    let conn = open_connection(db)?;
    let sql = format!(
        "SELECT {SECTION_COLUMNS} FROM sections WHERE instructor1 = ?1 COLLATE NOCASE
         ORDER BY subject_id, course_number, {}",
        SECTION_ORDER.trim_start_matches("ORDER BY ")
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![name], row_to_section)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn count_sections(db: &Path) -> Result<i64, AppError> {
    let conn = open_connection(db)?;
    Ok(conn.query_row("SELECT COUNT(*) FROM sections", [], |row| row.get(0))?)
}
