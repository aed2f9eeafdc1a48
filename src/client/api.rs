//! Cliente HTTP del endpoint `/api/courses/search`.
//!
//! El mismo path atiende dos formas de consulta: `?query=` devuelve
//! sugerencias y `?course=` (o `?professor=`) devuelve el historial de
//! secciones. Los traits permiten sustituir la red en las pruebas.

use futures_util::future::{BoxFuture, FutureExt};
use serde::de::DeserializeOwned;

use crate::client::error::ClientError;
use crate::client::route::ResultsRoute;
use crate::models::{SectionRecord, Suggestion};

pub const SEARCH_PATH: &str = "/api/courses/search";

/// Fuente de sugerencias para el autocompletado.
pub trait SuggestionSource: Send + Sync + 'static {
    /// `query` ya viene normalizada.
    fn suggestions(&self, query: &str) -> BoxFuture<'static, Result<Vec<Suggestion>, ClientError>>;
}

/// Fuente del historial de secciones que alimenta la vista de resultados.
pub trait SectionSource: Send + Sync + 'static {
    fn sections(&self, route: &ResultsRoute) -> BoxFuture<'static, Result<Vec<SectionRecord>, ClientError>>;
}

#[derive(Debug, Clone)]
pub struct GradesApi {
    http: reqwest::Client,
    base_url: String,
}

impl GradesApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        GradesApi { http, base_url }
    }

    pub fn search_url(&self) -> String {
        format!("{}{}", self.base_url, SEARCH_PATH)
    }

    fn get_json<T>(&self, param: &'static str, value: String) -> BoxFuture<'static, Result<T, ClientError>>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let request = self.http.get(self.search_url()).query(&[(param, value)]);
        async move {
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::Status(status.as_u16()));
            }
            let body = response.bytes().await?;
            Ok(serde_json::from_slice::<T>(&body)?)
        }
        .boxed()
    }
}

impl SuggestionSource for GradesApi {
    fn suggestions(&self, query: &str) -> BoxFuture<'static, Result<Vec<Suggestion>, ClientError>> {
        self.get_json("query", query.to_string())
    }
}

impl SectionSource for GradesApi {
    fn sections(&self, route: &ResultsRoute) -> BoxFuture<'static, Result<Vec<SectionRecord>, ClientError>> {
        self.get_json(route.kind().param(), route.value().to_string())
    }
}
