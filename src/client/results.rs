//! Derivaciones de la vista de resultados.
//!
//! Todo se calcula en memoria sobre la lista de `SectionRecord` del curso
//! buscado. La selección es una cadena que se estrecha:
//! profesor -> año/semestre -> sección. Cambiar un eslabón invalida los que
//! dependen de él.

use std::collections::HashSet;

use crate::models::SectionRecord;

/// Estado de filtros de la vista de resultados.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChain {
    professor: Option<String>,
    year: Option<String>,
    semester: Option<String>,
    section: Option<String>,
}

impl SelectionChain {
    /// Elegir profesor reinicia año, semestre y sección.
    pub fn select_professor(&mut self, professor: impl Into<String>) {
        self.professor = Some(professor.into());
        self.year = None;
        self.semester = None;
        self.section = None;
    }

    /// `None` quita el filtro de año. Nunca elige sección por su cuenta.
    pub fn select_year(&mut self, year: Option<String>) {
        self.year = year;
    }

    pub fn select_semester(&mut self, semester: Option<String>) {
        self.semester = semester;
    }

    pub fn select_section(&mut self, section: Option<String>) {
        self.section = section;
    }

    pub fn reset(&mut self) {
        *self = SelectionChain::default();
    }

    pub fn professor(&self) -> Option<&str> {
        self.professor.as_deref()
    }

    pub fn year(&self) -> Option<&str> {
        self.year.as_deref()
    }

    pub fn semester(&self) -> Option<&str> {
        self.semester.as_deref()
    }

    pub fn section(&self) -> Option<&str> {
        self.section.as_deref()
    }
}

/// Resumen de las secciones visibles.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSummary {
    pub sections: usize,
    pub students: u32,
    /// Promedio ponderado por `grades_count`; `None` sin alumnos.
    pub average_gpa: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct ResultsAggregator {
    records: Vec<SectionRecord>,
    selection: SelectionChain,
}

impl ResultsAggregator {
    pub fn new(records: Vec<SectionRecord>) -> Self {
        ResultsAggregator { records, selection: SelectionChain::default() }
    }

    pub fn records(&self) -> &[SectionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn selection(&self) -> &SelectionChain {
        &self.selection
    }

    pub fn select_professor(&mut self, professor: impl Into<String>) {
        self.selection.select_professor(professor);
    }

    pub fn select_year(&mut self, year: Option<String>) {
        self.selection.select_year(year);
    }

    pub fn select_semester(&mut self, semester: Option<String>) {
        self.selection.select_semester(semester);
    }

    pub fn select_section(&mut self, section: Option<String>) {
        self.selection.select_section(section);
    }

    pub fn reset_selection(&mut self) {
        self.selection.reset();
    }

    /// Profesores distintos, en orden de primera aparición.
    pub fn professors(&self) -> Vec<&str> {
        distinct(self.records.iter().map(|r| r.instructor1.as_str()))
    }

    /// Vacío mientras no haya profesor elegido.
    pub fn filtered_by_professor(&self) -> Vec<&SectionRecord> {
        match self.selection.professor() {
            Some(p) => self.records.iter().filter(|r| r.instructor1 == p).collect(),
            None => Vec::new(),
        }
    }

    pub fn years(&self) -> Vec<&str> {
        distinct(self.filtered_by_professor().into_iter().map(|r| r.year.as_str()))
    }

    pub fn semesters(&self) -> Vec<&str> {
        distinct(self.filtered_by_professor().into_iter().map(|r| r.semester.as_str()))
    }

    /// Secciones filtradas por profesor, año y semestre, con a lo sumo un
    /// registro por `section_number` (gana el primero).
    pub fn final_filtered(&self) -> Vec<&SectionRecord> {
        let year = self.selection.year();
        let semester = self.selection.semester();
        let mut seen: HashSet<&str> = HashSet::new();

        self.filtered_by_professor()
            .into_iter()
            .filter(|r| year.is_none_or(|y| r.year == y))
            .filter(|r| semester.is_none_or(|s| r.semester == s))
            .filter(|r| seen.insert(r.section_number.as_str()))
            .collect()
    }

    /// Registro de la sección elegida si sigue visible tras estrechar.
    /// Si ya no lo está no se reasigna: la vista no muestra detalle.
    pub fn selected_record(&self) -> Option<&SectionRecord> {
        let section = self.selection.section()?;
        self.final_filtered()
            .into_iter()
            .find(|r| r.section_number == section)
    }

    pub fn summary(&self) -> ResultsSummary {
        let visible = self.final_filtered();
        let students: u32 = visible.iter().map(|r| r.grades_count).sum();
        let weighted: f64 = visible.iter().map(|r| r.course_gpa * f64::from(r.grades_count)).sum();
        let average_gpa = if students > 0 { Some(weighted / f64::from(students)) } else { None };

        ResultsSummary { sections: visible.len(), students, average_gpa }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
