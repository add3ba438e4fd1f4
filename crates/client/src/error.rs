/// Errors from the master-data API client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error envelope.
    #[error("API error ({status} {code}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code, e.g. `VALIDATION_ERROR`.
        code: String,
        message: String,
    },

    /// A success envelope arrived without a `data` payload.
    #[error("Response envelope carried no data")]
    MissingData,
}
