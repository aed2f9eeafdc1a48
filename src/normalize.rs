//! Normalización de texto de búsqueda.
//!
//! Convierte lo que el usuario teclea en la consulta canónica que se envía
//! al endpoint de sugerencias, y ofrece utilidades para reconocer códigos de
//! curso ("CSE 1310") dentro de textos de sugerencia.

use regex::Regex;
use std::sync::OnceLock;

fn course_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z]+)([0-9]+)$").expect("course token regex"))
}

// Nombre concatenado que termina en la inicial "g" (p. ej. "marnimg").
// Heurística frágil heredada de los datos de búsqueda; no generalizar.
fn trailing_initial_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[A-Za-z]+g$").expect("trailing initial regex"))
}

/// Normaliza la entrada cruda del usuario. Función total.
///
/// - `"cse1310"` -> `"cse 1310"` (separa prefijo y número, respeta mayúsculas)
/// - `"marnimg"` -> `"marnim g"` (separa la inicial final `g`)
/// - resto: colapsa espacios y recorta extremos
pub fn normalize(raw: &str) -> String {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    if let Some(caps) = course_token_re().captures(&compact) {
        return format!("{} {}", &caps[1], &caps[2]);
    }

    if trailing_initial_re().is_match(&compact) {
        // ASCII only past the regex, so the split is on a char boundary
        let (name, initial) = compact.split_at(compact.len() - 1);
        return format!("{} {}", name, initial);
    }

    collapse_whitespace(raw)
}

/// Collapse runs of whitespace into a single space and trim both ends.
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Si los dos primeros tokens son `<PREFIJO> <NÚMERO de 4 dígitos>`
/// devuelve exactamente `"<PREFIJO> <NÚMERO>"`, descartando el título que
/// acompañe a la sugerencia ("CSE 1310 - Intro to Programming").
pub fn canonical_course_code(text: &str) -> Option<String> {
    let mut tokens = text.split_whitespace();
    let prefix = tokens.next()?;
    let number = tokens.next()?;

    let prefix_ok = !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphabetic());
    let number_ok = number.len() == 4 && number.chars().all(|c| c.is_ascii_digit());
    if prefix_ok && number_ok {
        Some(format!("{} {}", prefix, number))
    } else {
        None
    }
}

/// Descompone un texto con forma de código de curso en (materia, número),
/// con la materia en mayúsculas. Acepta "CSE 1310", "cse1310" y
/// "CSE 1310 - Intro to Programming".
pub fn parse_course_code(text: &str) -> Option<(String, String)> {
    let head = match canonical_course_code(text) {
        Some(code) => code,
        None => normalize(text),
    };
    let compact: String = head.chars().filter(|c| !c.is_whitespace()).collect();
    let caps = course_token_re().captures(&compact)?;
    Some((caps[1].to_ascii_uppercase(), caps[2].to_string()))
}

/// True when the text reads like a course code rather than a person's name.
pub fn looks_like_course_code(text: &str) -> bool {
    canonical_course_code(text).is_some() || parse_course_code(text).is_some()
}
