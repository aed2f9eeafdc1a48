// Biblioteca raíz del crate `gradelens`.
// Consulta de distribuciones de notas históricas por curso y profesor:
// el núcleo del cliente (autocompletado, navegación, filtros) y el servidor
// de búsqueda que responde `/api/courses/search`.
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod server;
pub mod server_handlers;
pub mod store;

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
