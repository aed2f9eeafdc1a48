// --- gradelens - servidor de búsqueda de notas ---

use gradelens::config::Config;
use gradelens::run_server;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::load();
    info!("=== gradelens (API) ===");
    info!("Iniciando servidor en http://{}", config.bind);
    run_server(config).await
}
