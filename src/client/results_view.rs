use tracing::{info, warn};

use crate::client::api::SectionSource;
use crate::client::results::ResultsAggregator;
use crate::client::route::ResultsRoute;
use crate::client::search_input::DisplayedResult;
use crate::models::SectionRecord;

/// Vista de resultados: lee la ruta, pide el historial correspondiente y es
/// dueña del agregador mientras la vista existe.
///
/// En la ruta de profesor los registros abarcan varios cursos; hay que
/// elegir uno (`open_course`) antes de filtrar, porque los números de
/// sección solo son únicos dentro de un curso.
#[derive(Debug, Clone)]
pub struct ResultsView {
    route: ResultsRoute,
    records: Vec<SectionRecord>,
    course: Option<String>,
    aggregator: ResultsAggregator,
}

impl ResultsView {
    /// Los errores de red o de formato se registran y dejan la vista vacía.
    pub async fn load(route: ResultsRoute, source: &dyn SectionSource) -> Self {
        let records = match source.sections(&route).await {
            Ok(records) => records,
            Err(e) => {
                warn!(route = %route, error = %e, "failed to load section history");
                Vec::new()
            }
        };
        info!(route = %route, sections = records.len(), "results loaded");
        Self::from_records(route, records)
    }

    pub async fn load_path(path: &str, source: &dyn SectionSource) -> Option<Self> {
        let route = ResultsRoute::parse(path)?;
        Some(Self::load(route, source).await)
    }

    pub fn from_records(route: ResultsRoute, records: Vec<SectionRecord>) -> Self {
        let mut view = ResultsView {
            route,
            records,
            course: None,
            aggregator: ResultsAggregator::default(),
        };
        if let ResultsRoute::Course(code) = &view.route {
            view.course = Some(code.clone());
            view.aggregator = ResultsAggregator::new(view.records.clone());
        }
        view
    }

    pub fn route(&self) -> &ResultsRoute {
        &self.route
    }

    pub fn displayed(&self) -> DisplayedResult {
        DisplayedResult::from_route(&self.route)
    }

    /// "No results": la búsqueda fue válida pero no hay datos.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Cursos distintos presentes en los registros, por orden de aparición.
    pub fn courses(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for record in &self.records {
            let code = record.course_code();
            if !out.contains(&code) {
                out.push(code);
            }
        }
        out
    }

    /// Solo tiene efecto en la ruta de profesor: limita el agregador a un
    /// curso y deja ese profesor ya elegido.
    pub fn open_course(&mut self, code: &str) {
        let ResultsRoute::Professor(professor) = &self.route else {
            return;
        };
        let records: Vec<SectionRecord> = self
            .records
            .iter()
            .filter(|r| r.course_code() == code)
            .cloned()
            .collect();
        let mut aggregator = ResultsAggregator::new(records);
        aggregator.select_professor(professor.clone());
        self.aggregator = aggregator;
        self.course = Some(code.to_string());
    }

    pub fn course(&self) -> Option<&str> {
        self.course.as_deref()
    }

    pub fn aggregator(&self) -> &ResultsAggregator {
        &self.aggregator
    }

    pub fn aggregator_mut(&mut self) -> &mut ResultsAggregator {
        &mut self.aggregator
    }

    /// Callback de reinicio que la caja de búsqueda invoca al navegar a otro
    /// destino.
    pub fn reset_selection(&mut self) {
        self.aggregator.reset_selection();
    }
}
