// Datos para el panel de detalle de una sección. El gráfico en sí queda
// fuera de este crate; aquí solo se preparan las barras del histograma.

use serde::Serialize;

use crate::models::{GradeDistribution, SectionRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeBar {
    pub grade: &'static str,
    pub count: u32,
    /// 0.0 - 100.0 sobre el total de notas registradas.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionDetail {
    pub course: String,
    pub title: Option<String>,
    pub instructor: String,
    pub term: String,
    pub section_number: String,
    pub course_gpa: f64,
    pub grades_count: u32,
    pub histogram: Vec<GradeBar>,
}

impl SectionDetail {
    pub fn from_record(record: &SectionRecord) -> Self {
        SectionDetail {
            course: record.course_code(),
            title: record.course_title.clone(),
            instructor: record.instructor1.clone(),
            term: record.term(),
            section_number: record.section_number.clone(),
            course_gpa: record.course_gpa,
            grades_count: record.grades_count,
            histogram: histogram(&record.grades),
        }
    }

    /// "CSE 1310 - 001"
    pub fn heading(&self) -> String {
        format!("{} - {}", self.course, self.section_number)
    }
}

/// A-F siempre aparecen; el resto de notas (W, I, P...) solo si hay alguna.
pub fn histogram(grades: &GradeDistribution) -> Vec<GradeBar> {
    let total = grades.total();
    grades
        .buckets()
        .into_iter()
        .filter(|(grade, count)| *count > 0 || GradeDistribution::LETTERS.contains(grade))
        .map(|(grade, count)| GradeBar {
            grade,
            count,
            percent: if total == 0 { 0.0 } else { f64::from(count) * 100.0 / f64::from(total) },
        })
        .collect()
}
