// --- File: crates/quadra_common/src/error.rs ---
use thiserror::Error;

/// The error type shared by every Quadra crate.
///
/// Crate-specific errors convert into this type with `From` impls, and the
/// HTTP layer turns it into a status code plus a plain-text message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuadraError {
    /// Structurally invalid input (bad JSON, unparseable field, id mismatch)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid admin credentials
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// The requested slot overlaps an existing reservation
    #[error("Conflict: {0}")]
    ConflictError(String),

    /// The referenced reservation does not exist
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Any other store failure
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for QuadraError {
    fn status_code(&self) -> u16 {
        match self {
            QuadraError::BadRequest(_) => 400,
            QuadraError::AuthError(_) => 401,
            QuadraError::NotFoundError(_) => 404,
            QuadraError::ConflictError(_) => 409,
            QuadraError::StoreUnavailable(_) => 503,
            QuadraError::DatabaseError(_) => 500,
            QuadraError::ConfigError(_) => 500,
            QuadraError::InternalError(_) => 500,
        }
    }
}

impl QuadraError {
    /// Text that is safe to hand to a caller.
    ///
    /// Client errors carry their own message; server-side failures are
    /// reduced to a generic sentence and only logged in full.
    pub fn public_message(&self) -> String {
        match self {
            QuadraError::BadRequest(msg)
            | QuadraError::AuthError(msg)
            | QuadraError::ConflictError(msg)
            | QuadraError::NotFoundError(msg) => msg.clone(),
            QuadraError::StoreUnavailable(_) => {
                "O serviço de armazenamento está indisponível. Tente novamente mais tarde."
                    .to_string()
            }
            QuadraError::DatabaseError(_)
            | QuadraError::ConfigError(_)
            | QuadraError::InternalError(_) => "Erro interno do servidor.".to_string(),
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}
