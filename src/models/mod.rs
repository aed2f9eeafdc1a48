// Estructuras de datos principales

use serde::{Deserialize, Deserializer, Serialize};

/// Una oferta histórica de una sección (profesor, año, semestre, número de
/// sección) con su distribución de notas. Inmutable una vez leída.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub subject_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub course_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_title: Option<String>,
    pub instructor1: String,
    #[serde(deserialize_with = "string_or_number")]
    pub year: String,
    pub semester: String,
    #[serde(deserialize_with = "string_or_number")]
    pub section_number: String,
    #[serde(default)]
    pub course_gpa: f64,
    #[serde(default)]
    pub grades_count: u32,
    #[serde(flatten)]
    pub grades: GradeDistribution,
}

impl SectionRecord {
    /// Código del curso en forma canónica, p. ej. "CSE 1310".
    pub fn course_code(&self) -> String {
        format!("{} {}", self.subject_id, self.course_number)
    }

    /// "Fall 2023"
    pub fn term(&self) -> String {
        format!("{} {}", self.semester, self.year)
    }
}

/// Conteo de notas por letra. Los campos ausentes en el JSON valen 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeDistribution {
    #[serde(rename = "grades_A", default)]
    pub a: u32,
    #[serde(rename = "grades_B", default)]
    pub b: u32,
    #[serde(rename = "grades_C", default)]
    pub c: u32,
    #[serde(rename = "grades_D", default)]
    pub d: u32,
    #[serde(rename = "grades_F", default)]
    pub f: u32,
    #[serde(rename = "grades_I", default)]
    pub i: u32,
    #[serde(rename = "grades_P", default)]
    pub p: u32,
    #[serde(rename = "grades_Q", default)]
    pub q: u32,
    #[serde(rename = "grades_W", default)]
    pub w: u32,
    #[serde(rename = "grades_Z", default)]
    pub z: u32,
    #[serde(rename = "grades_R", default)]
    pub r: u32,
}

impl GradeDistribution {
    /// Letter grades always shown in a histogram, in display order.
    pub const LETTERS: [&'static str; 5] = ["A", "B", "C", "D", "F"];

    /// Pares (nota, cantidad) en orden de presentación.
    pub fn buckets(&self) -> [(&'static str, u32); 11] {
        [
            ("A", self.a),
            ("B", self.b),
            ("C", self.c),
            ("D", self.d),
            ("F", self.f),
            ("I", self.i),
            ("P", self.p),
            ("Q", self.q),
            ("W", self.w),
            ("Z", self.z),
            ("R", self.r),
        ]
    }

    pub fn total(&self) -> u32 {
        self.buckets().iter().map(|(_, n)| n).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Course,
    Professor,
}

impl SuggestionKind {
    /// Nombre del parámetro de ruta/consulta asociado (`course` / `professor`).
    pub fn param(&self) -> &'static str {
        match self {
            SuggestionKind::Course => "course",
            SuggestionKind::Professor => "professor",
        }
    }
}

/// Entrada del desplegable de autocompletado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub suggestion: String,
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
}

impl Suggestion {
    pub fn course(text: impl Into<String>) -> Self {
        Suggestion { suggestion: text.into(), kind: SuggestionKind::Course }
    }

    pub fn professor(text: impl Into<String>) -> Self {
        Suggestion { suggestion: text.into(), kind: SuggestionKind::Professor }
    }
}

// Upstream data mixes "2023" and 2023 for year/section/course numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s.trim().to_string(),
        Raw::Int(i) => i.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}
