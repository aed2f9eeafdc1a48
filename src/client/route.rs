//! Rutas de la vista de resultados: `/results?course=<v>` y
//! `/results?professor=<v>`.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

use crate::models::SuggestionKind;

pub const RESULTS_PATH: &str = "/results";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsRoute {
    Course(String),
    Professor(String),
}

impl ResultsRoute {
    pub fn new(kind: SuggestionKind, value: impl Into<String>) -> Self {
        match kind {
            SuggestionKind::Course => ResultsRoute::Course(value.into()),
            SuggestionKind::Professor => ResultsRoute::Professor(value.into()),
        }
    }

    pub fn kind(&self) -> SuggestionKind {
        match self {
            ResultsRoute::Course(_) => SuggestionKind::Course,
            ResultsRoute::Professor(_) => SuggestionKind::Professor,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            ResultsRoute::Course(v) | ResultsRoute::Professor(v) => v,
        }
    }

    pub fn to_path(&self) -> String {
        format!(
            "{}?{}={}",
            RESULTS_PATH,
            self.kind().param(),
            utf8_percent_encode(self.value(), NON_ALPHANUMERIC)
        )
    }

    /// Interpreta una ruta de resultados. `course` tiene prioridad sobre
    /// `professor`; valores vacíos o mal codificados se ignoran, igual que
    /// cualquier otro parámetro.
    pub fn parse(path: &str) -> Option<Self> {
        let (base, query) = path.split_once('?')?;
        if base.trim_end_matches('/') != RESULTS_PATH {
            return None;
        }

        let mut course = None;
        let mut professor = None;
        for pair in query.split('&') {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            if key != "course" && key != "professor" {
                continue;
            }
            let Some(value) = decode(raw) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key {
                "course" if course.is_none() => course = Some(value.to_string()),
                "professor" if professor.is_none() => professor = Some(value.to_string()),
                _ => {}
            }
        }

        course
            .map(ResultsRoute::Course)
            .or_else(|| professor.map(ResultsRoute::Professor))
    }
}

impl fmt::Display for ResultsRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn decode(raw: &str) -> Option<String> {
    let plus_as_space = raw.replace('+', " ");
    percent_decode_str(&plus_as_space)
        .decode_utf8()
        .ok()
        .map(|s| s.into_owned())
}
