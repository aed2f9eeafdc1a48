#![allow(dead_code)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};
use gradelens::client::{ClientError, ResultsRoute, SectionSource, SuggestionSource};
use gradelens::models::{GradeDistribution, SectionRecord, Suggestion};

/// Registro de CSE 1310 con los campos que importan a los filtros.
pub fn record(instructor: &str, year: &str, semester: &str, section: &str, gpa: f64, count: u32) -> SectionRecord {
    SectionRecord {
        subject_id: "CSE".to_string(),
        course_number: "1310".to_string(),
        course_title: Some("Intro to Programming".to_string()),
        instructor1: instructor.to_string(),
        year: year.to_string(),
        semester: semester.to_string(),
        section_number: section.to_string(),
        course_gpa: gpa,
        grades_count: count,
        grades: GradeDistribution { a: count / 2, b: count - count / 2, ..Default::default() },
    }
}

pub fn with_course(mut r: SectionRecord, subject: &str, number: &str, title: Option<&str>) -> SectionRecord {
    r.subject_id = subject.to_string();
    r.course_number = number.to_string();
    r.course_title = title.map(|t| t.to_string());
    r
}

/// Dataset pequeño: dos cursos, tres profesores.
pub fn sample_records() -> Vec<SectionRecord> {
    vec![
        record("Smith", "2023", "Fall", "001", 3.1, 40),
        record("Smith", "2022", "Spring", "002", 2.9, 35),
        record("Marnim Galib", "2023", "Fall", "003", 3.4, 30),
        with_course(record("Marnim Galib", "2022", "Fall", "001", 3.0, 25), "CSE", "3318", Some("Algorithms and Data Structures")),
        with_course(record("Jane Doe", "2021", "Summer", "001", 2.5, 20), "MATH", "1426", None),
    ]
}

/// Ruta de SQLite única por prueba, borrada al empezar.
pub fn temp_db(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("gradelens-{}-{}.db", name, std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

/// Fuente de sugerencias falsa: registra cada consulta y responde tras un
/// retardo configurable por consulta.
pub struct MockSource {
    calls: Mutex<Vec<String>>,
    delays: HashMap<String, Duration>,
    default_delay: Duration,
    fixed: Option<Vec<Suggestion>>,
    fail: bool,
}

impl MockSource {
    pub fn new() -> Self {
        MockSource {
            calls: Mutex::new(Vec::new()),
            delays: HashMap::new(),
            default_delay: Duration::ZERO,
            fixed: None,
            fail: false,
        }
    }

    pub fn with_results(results: Vec<Suggestion>) -> Self {
        MockSource { fixed: Some(results), ..Self::new() }
    }

    pub fn failing() -> Self {
        MockSource { fail: true, ..Self::new() }
    }

    pub fn delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn default_delay(mut self, delay: Duration) -> Self {
        self.default_delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

/// Respuesta de `MockSource` para una consulta sin lista fija.
pub fn echo(query: &str) -> Vec<Suggestion> {
    vec![Suggestion::course(format!("{} result", query))]
}

impl SuggestionSource for MockSource {
    fn suggestions(&self, query: &str) -> BoxFuture<'static, Result<Vec<Suggestion>, ClientError>> {
        self.calls.lock().unwrap().push(query.to_string());
        let delay = self.delays.get(query).copied().unwrap_or(self.default_delay);
        let fail = self.fail;
        let result = self.fixed.clone().unwrap_or_else(|| echo(query));
        async move {
            tokio::time::sleep(delay).await;
            if fail {
                Err(ClientError::Status(502))
            } else {
                Ok(result)
            }
        }
        .boxed()
    }
}

/// Fuente de secciones en memoria que imita al backend.
pub struct MemorySections {
    pub records: Vec<SectionRecord>,
    pub fail: bool,
}

impl SectionSource for MemorySections {
    fn sections(&self, route: &ResultsRoute) -> BoxFuture<'static, Result<Vec<SectionRecord>, ClientError>> {
        let out: Vec<SectionRecord> = match route {
            ResultsRoute::Course(code) => self.records.iter().filter(|r| &r.course_code() == code).cloned().collect(),
            ResultsRoute::Professor(name) => self.records.iter().filter(|r| &r.instructor1 == name).cloned().collect(),
        };
        let fail = self.fail;
        async move {
            if fail {
                Err(ClientError::Status(500))
            } else {
                Ok(out)
            }
        }
        .boxed()
    }
}
