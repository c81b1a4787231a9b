/// OAuth client credentials for a Firebolt service account.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

/// Firebolt connection settings loaded from environment variables.
#[derive(Debug, Clone)]
pub struct FireboltConfig {
    /// `None` when either credential variable is missing or empty; the
    /// client then fails every query with `DbError::MissingCredentials`.
    pub credentials: Option<Credentials>,
    pub account: String,
    pub database: String,
    pub engine: String,
    /// Identity service base URL.
    pub auth_url: String,
    /// Control-plane API base URL.
    pub api_url: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl FireboltConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                        |
    /// |--------------------------|--------------------------------|
    /// | `FIREBOLT_CLIENT_ID`     | (none)                         |
    /// | `FIREBOLT_CLIENT_SECRET` | (none)                         |
    /// | `FIREBOLT_ACCOUNT`       | `account-1`                    |
    /// | `FIREBOLT_DATABASE`      | `playstats`                    |
    /// | `FIREBOLT_ENGINE`        | `my_engine`                    |
    /// | `FIREBOLT_AUTH_URL`      | `https://id.app.firebolt.io`   |
    /// | `FIREBOLT_API_URL`       | `https://api.app.firebolt.io`  |
    /// | `FIREBOLT_TIMEOUT_SECS`  | `60`                           |
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let credentials = match (var("FIREBOLT_CLIENT_ID"), var("FIREBOLT_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(Credentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        // Older .env files used FIREBOLT_ACCOUNT_NAME.
        let account = var("FIREBOLT_ACCOUNT")
            .or_else(|| var("FIREBOLT_ACCOUNT_NAME"))
            .unwrap_or_else(|| "account-1".into());

        let timeout_secs = var("FIREBOLT_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(60);

        Self {
            credentials,
            account,
            database: var("FIREBOLT_DATABASE").unwrap_or_else(|| "playstats".into()),
            engine: var("FIREBOLT_ENGINE").unwrap_or_else(|| "my_engine".into()),
            auth_url: var("FIREBOLT_AUTH_URL")
                .unwrap_or_else(|| "https://id.app.firebolt.io".into()),
            api_url: var("FIREBOLT_API_URL")
                .unwrap_or_else(|| "https://api.app.firebolt.io".into()),
            timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_redacts_the_secret() {
        let creds = Credentials {
            client_id: "id-123".into(),
            client_secret: "super-secret".into(),
        };
        let printed = format!("{creds:?}");
        assert!(printed.contains("id-123"));
        assert!(!printed.contains("super-secret"));
    }
}
