/// Errors from the database access layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Client id or secret is not configured.
    #[error("Firebolt credentials are not configured (set FIREBOLT_CLIENT_ID and FIREBOLT_CLIENT_SECRET)")]
    MissingCredentials,

    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The identity service rejected the client credentials.
    #[error("Authentication failed ({status}): {body}")]
    Auth { status: u16, body: String },

    /// The engine returned a non-2xx status code.
    #[error("Firebolt API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// No engine with the configured name exists on the account.
    #[error("Engine '{0}' not found")]
    EngineNotFound(String),

    /// A statement could not be rendered from the given values.
    #[error("Could not build statement: {0}")]
    Statement(#[from] geodemo_core::error::CoreError),

    /// A response body or row could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl DbError {
    /// Whether the error means the database could not be reached or the
    /// caller is not allowed in, as opposed to a failing statement.
    ///
    /// The engine answers an expired or revoked token, or a missing grant,
    /// with 401/403 on the query itself; those count as connection errors.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::MissingCredentials
                | Self::Request(_)
                | Self::Auth { .. }
                | Self::EngineNotFound(_)
                | Self::Api { status: 401 | 403, .. }
        )
    }
}
