use actix_web::{web, HttpResponse};
use std::collections::HashMap;

use tracing::debug;

use crate::error::AppError;
use crate::server::AppState;
use crate::store;

/// Forma de consulta del endpoint de búsqueda.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRequest {
    Suggest(String),
    Course(String),
    Professor(String),
}

impl SearchRequest {
    /// `query` tiene prioridad sobre `course`, y éste sobre `professor`.
    /// Parámetros vacíos cuentan como ausentes.
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, AppError> {
        let get = |key: &str| params.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(q) = get("query") {
            Ok(SearchRequest::Suggest(q.to_string()))
        } else if let Some(c) = get("course") {
            Ok(SearchRequest::Course(c.to_string()))
        } else if let Some(p) = get("professor") {
            Ok(SearchRequest::Professor(p.to_string()))
        } else {
            Err(AppError::BadRequest(
                "one of query, course or professor is required".to_string(),
            ))
        }
    }
}

/// GET /api/courses/search?query=<texto> | ?course=<código> | ?professor=<nombre>
pub async fn search_handler(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> Result<HttpResponse, AppError> {
    let request = SearchRequest::from_params(&query)?;
    debug!(?request, "search");

    let limit = state.suggestion_limit;
    match request {
        SearchRequest::Suggest(text) => {
            let suggestions = state.run_blocking(move |db| store::suggest(db, &text, limit)).await?;
            Ok(HttpResponse::Ok().json(suggestions))
        }
        SearchRequest::Course(code) => {
            let sections = state.run_blocking(move |db| store::sections_for_course(db, &code)).await?;
            Ok(HttpResponse::Ok().json(sections))
        }
        SearchRequest::Professor(name) => {
            let sections = state.run_blocking(move |db| store::sections_for_professor(db, &name)).await?;
            Ok(HttpResponse::Ok().json(sections))
        }
    }
}
