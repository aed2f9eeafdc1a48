//! Base de datos de notas (SQLite).
//!
//! Cada operación abre una conexión de vida corta sobre la ruta indicada;
//! el servidor las ejecuta dentro de `spawn_blocking`.

pub mod db;
pub mod import;
pub mod queries;

pub use db::{init_db, open_connection};
pub use import::{import_json_file, import_sections, last_import};
pub use queries::{count_sections, sections_for_course, sections_for_professor, suggest};
