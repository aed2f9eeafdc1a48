//! Caja de búsqueda con desplegable de sugerencias.
//!
//! Máquina de estados: Idle -> Typing -> (Loading | SuggestionsShown) -> Selected.
//! Al elegir una sugerencia se produce exactamente una navegación y, como
//! mucho, una invocación del callback de reinicio de la vista. Si lo elegido
//! es lo mismo que ya se muestra, el reinicio se suprime para no perder la
//! selección profesor/año/semestre/sección.

use tracing::debug;

use crate::client::fetcher::SuggestionFetcher;
use crate::client::route::ResultsRoute;
use crate::models::{Suggestion, SuggestionKind};
use crate::normalize::{canonical_course_code, collapse_whitespace, looks_like_course_code, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Idle,
    Typing,
    Loading,
    SuggestionsShown,
    Selected,
}

/// Identidad de lo que la vista de resultados está mostrando.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayedResult {
    pub route_type: Option<SuggestionKind>,
    pub course: Option<String>,
    pub professor: Option<String>,
}

impl DisplayedResult {
    pub fn from_route(route: &ResultsRoute) -> Self {
        match route {
            ResultsRoute::Course(c) => DisplayedResult {
                route_type: Some(SuggestionKind::Course),
                course: Some(c.clone()),
                professor: None,
            },
            ResultsRoute::Professor(p) => DisplayedResult {
                route_type: Some(SuggestionKind::Professor),
                course: None,
                professor: Some(p.clone()),
            },
        }
    }

    pub fn shows(&self, route: &ResultsRoute) -> bool {
        let shown = match route.kind() {
            SuggestionKind::Course => self.course.as_deref(),
            SuggestionKind::Professor => self.professor.as_deref(),
        };
        self.route_type == Some(route.kind()) && shown == Some(route.value())
    }
}

/// Resultado de una selección.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: ResultsRoute,
    pub reset_invoked: bool,
}

impl Navigation {
    pub fn path(&self) -> String {
        self.route.to_path()
    }
}

/// Calcula la ruta destino de un texto elegido en el desplegable.
///
/// El tipo se toma de la lista de sugerencias actual; si el texto no está
/// en ella se clasifica por su forma. Las sugerencias de curso se reducen a
/// `"<PREFIJO> <NÚMERO>"` descartando el título que las acompaña.
pub fn resolve_target(text: &str, suggestions: &[Suggestion]) -> ResultsRoute {
    let kind = suggestions
        .iter()
        .find(|s| s.suggestion == text)
        .map(|s| s.kind)
        .unwrap_or_else(|| {
            if looks_like_course_code(text) {
                SuggestionKind::Course
            } else {
                SuggestionKind::Professor
            }
        });

    match kind {
        SuggestionKind::Course => {
            let code = canonical_course_code(text).unwrap_or_else(|| normalize(text));
            ResultsRoute::Course(code)
        }
        SuggestionKind::Professor => ResultsRoute::Professor(collapse_whitespace(text)),
    }
}

type ResetCallback = Box<dyn FnMut() + Send>;

pub struct SearchInput {
    text: String,
    state: InputState,
    fetcher: SuggestionFetcher,
    displayed: DisplayedResult,
    on_reset: Option<ResetCallback>,
}

impl SearchInput {
    pub fn new(fetcher: SuggestionFetcher) -> Self {
        SearchInput {
            text: String::new(),
            state: InputState::Idle,
            fetcher,
            displayed: DisplayedResult::default(),
            on_reset: None,
        }
    }

    pub fn with_displayed(mut self, displayed: DisplayedResult) -> Self {
        self.displayed = displayed;
        self
    }

    pub fn with_reset<F>(mut self, on_reset: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_reset = Some(Box::new(on_reset));
        self
    }

    pub fn set_displayed(&mut self, displayed: DisplayedResult) {
        self.displayed = displayed;
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.fetcher.snapshot().suggestions
    }

    pub fn fetcher(&self) -> &SuggestionFetcher {
        &self.fetcher
    }

    pub fn on_keystroke(&mut self, text: &str) {
        self.text = text.to_string();
        self.state = InputState::Typing;
        self.fetcher.on_input(text);
    }

    /// Reconcilia el estado con lo último publicado por el fetcher.
    pub fn sync(&mut self) -> InputState {
        if self.state == InputState::Selected {
            return self.state;
        }
        let snapshot = self.fetcher.snapshot();
        self.state = if self.text.trim().is_empty() {
            InputState::Idle
        } else if snapshot.loading {
            InputState::Loading
        } else if !snapshot.suggestions.is_empty() {
            InputState::SuggestionsShown
        } else {
            InputState::Typing
        };
        self.state
    }

    /// Selección por clic.
    pub fn select(&mut self, text: &str) -> Navigation {
        let suggestions = self.suggestions();
        let route = resolve_target(text, &suggestions);

        let reset_invoked = if self.displayed.shows(&route) {
            debug!(target = %route.value(), "re-selected the displayed result, keeping filters");
            false
        } else if let Some(on_reset) = self.on_reset.as_mut() {
            on_reset();
            true
        } else {
            false
        };

        self.fetcher.clear();
        self.text = route.value().to_string();
        self.state = InputState::Selected;
        self.displayed = DisplayedResult::from_route(&route);

        Navigation { route, reset_invoked }
    }

    /// Enter: elige la primera sugerencia. Sin sugerencias no hace nada.
    pub fn submit(&mut self) -> Option<Navigation> {
        let first = self.suggestions().into_iter().next()?;
        Some(self.select(&first.suggestion))
    }

    /// Desmontaje de la vista.
    pub fn teardown(&self) {
        self.fetcher.shutdown();
    }
}
