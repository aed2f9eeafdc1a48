use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{info, warn};

use crate::client::api::SEARCH_PATH;
use crate::config::Config;
use crate::error::AppError;
use crate::server_handlers::{health_handler, search_handler};
use crate::store;

/// Estado compartido por los handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_path: PathBuf,
    pub suggestion_limit: usize,
    limiter: Arc<Semaphore>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>, suggestion_limit: usize) -> Self {
        let permits = std::cmp::max(1, num_cpus::get());
        AppState {
            db_path: db_path.into(),
            suggestion_limit,
            limiter: Arc::new(Semaphore::new(permits)),
        }
    }

    /// Ejecuta una consulta SQLite fuera del runtime, con como mucho un
    /// trabajo bloqueante por CPU a la vez.
    pub async fn run_blocking<T, F>(&self, job: F) -> Result<T, AppError>
    where
        F: FnOnce(&Path) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let permit = self
            .limiter
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| AppError::Closed)?;
        let db_path = self.db_path.clone();

        tokio::task::spawn_blocking(move || {
            let _permit = permit;
            job(&db_path)
        })
        .await?
    }
}

/// Rutas de la API; compartidas por `run_server` y las pruebas.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(SEARCH_PATH, web::get().to(search_handler))
        .route("/health", web::get().to(health_handler));
}

fn cors(origin: Option<&str>) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET", "OPTIONS"])
        .max_age(3600);
    match origin {
        Some(o) => cors.allowed_origin(o),
        None => cors.allow_any_origin(),
    }
}

/// Prepara la base (tablas + seed opcional) y levanta el servidor HTTP.
pub async fn run_server(config: Config) -> std::io::Result<()> {
    store::init_db(&config.db_path).map_err(std::io::Error::other)?;

    if let Some(seed) = &config.seed {
        match store::import_json_file(&config.db_path, seed) {
            Ok(inserted) => info!(seed = %seed.display(), inserted, "seed imported"),
            Err(e) => warn!(seed = %seed.display(), error = %e, "seed import failed, starting with existing data"),
        }
    }

    let state = web::Data::new(AppState::new(config.db_path.clone(), config.suggestion_limit));
    let cors_origin = config.cors_origin.clone();

    info!(bind = %config.bind, db = %config.db_path.display(), "starting search server");
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(cors(cors_origin.as_deref()))
            .wrap(Logger::default())
            .configure(configure)
    })
    .bind(config.bind.as_str())?
    .run()
    .await
}
