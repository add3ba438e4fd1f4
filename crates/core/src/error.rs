/// Domain errors raised by the master-data pipeline and its mock actions.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A simulated failure of an external system the request depends on.
    #[error("Upstream failure ({code}): {message}")]
    Upstream {
        code: &'static str,
        message: String,
        detail: String,
    },
}
