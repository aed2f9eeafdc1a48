use thiserror::Error;

/// Fallos al consultar el endpoint de búsqueda. Se capturan en el borde del
/// fetch y se degradan a una lista vacía; nunca se propagan a la vista.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}
