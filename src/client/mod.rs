//! Núcleo del cliente: autocompletado, navegación y filtrado de resultados.

pub mod api;
pub mod detail;
pub mod error;
pub mod fetcher;
pub mod results;
pub mod results_view;
pub mod route;
pub mod scheduler;
pub mod search_input;

pub use api::{GradesApi, SectionSource, SuggestionSource};
pub use detail::SectionDetail;
pub use error::ClientError;
pub use fetcher::{SuggestionFetcher, SuggestionState, DEBOUNCE};
pub use results::{ResultsAggregator, ResultsSummary, SelectionChain};
pub use results_view::ResultsView;
pub use route::ResultsRoute;
pub use scheduler::{schedule, TaskHandle};
pub use search_input::{DisplayedResult, InputState, Navigation, SearchInput};
