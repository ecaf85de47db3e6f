use std::env;

use log::debug;

use crate::error::JmapError;

/// Which token the operation needs. List/get commands run with the
/// read-only token; anything that mutates folders or emails requires the
/// separate read-write token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    ReadOnly,
    ReadWrite,
}

impl TokenScope {
    fn env_var(self) -> &'static str {
        match self {
            TokenScope::ReadOnly => "JMAP_API_TOKEN",
            TokenScope::ReadWrite => "JMAP_API_TOKEN_RW",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub host: String,
    pub token: String,
    pub scope: TokenScope,
}

impl Credentials {
    /// Loads credentials from the environment (a local `.env` file is
    /// picked up first if present). Fails before any network attempt.
    pub fn from_env(scope: TokenScope) -> Result<Self, JmapError> {
        if dotenvy::dotenv().is_err() {
            debug!("no .env file found, using process environment only");
        }

        let host = env::var("JMAP_HOST").map_err(|_| {
            JmapError::Config(
                "JMAP_HOST environment variable is required (e.g. api.fastmail.com)".to_string(),
            )
        })?;

        let token_var = scope.env_var();
        let token = env::var(token_var)
            .map_err(|_| JmapError::Config(format!("{token_var} environment variable is required")))?;

        if host.trim().is_empty() {
            return Err(JmapError::Config("JMAP_HOST must not be empty".to_string()));
        }
        if token.trim().is_empty() {
            return Err(JmapError::Config(format!("{token_var} must not be empty")));
        }

        Ok(Credentials {
            host: normalize_host(&host),
            token,
            scope,
        })
    }
}

/// Strips a leading URL scheme; the JMAP session discovery expects a bare
/// hostname.
pub fn normalize_host(host: &str) -> String {
    host.strip_prefix("https://")
        .or_else(|| host.strip_prefix("http://"))
        .unwrap_or(host)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn normalize_host_strips_schemes() {
        assert_eq!(normalize_host("https://mail.example.com"), "mail.example.com");
        assert_eq!(normalize_host("http://mail.example.com"), "mail.example.com");
        assert_eq!(normalize_host("mail.example.com"), "mail.example.com");
    }

    #[test]
    #[serial]
    fn missing_host_is_a_config_error() {
        env::remove_var("JMAP_HOST");
        env::remove_var("JMAP_API_TOKEN");

        let err = Credentials::from_env(TokenScope::ReadOnly).unwrap_err();
        assert!(matches!(err, JmapError::Config(_)));
        assert!(err.to_string().contains("JMAP_HOST"));
    }

    #[test]
    #[serial]
    fn scope_selects_the_token_variable() {
        env::set_var("JMAP_HOST", "https://api.fastmail.com");
        env::set_var("JMAP_API_TOKEN", "ro-token");
        env::remove_var("JMAP_API_TOKEN_RW");

        let creds = Credentials::from_env(TokenScope::ReadOnly).unwrap();
        assert_eq!(creds.host, "api.fastmail.com");
        assert_eq!(creds.token, "ro-token");

        // Read-write scope must not fall back to the read-only token.
        let err = Credentials::from_env(TokenScope::ReadWrite).unwrap_err();
        assert!(err.to_string().contains("JMAP_API_TOKEN_RW"));

        env::set_var("JMAP_API_TOKEN_RW", "rw-token");
        let creds = Credentials::from_env(TokenScope::ReadWrite).unwrap();
        assert_eq!(creds.token, "rw-token");

        env::remove_var("JMAP_HOST");
        env::remove_var("JMAP_API_TOKEN");
        env::remove_var("JMAP_API_TOKEN_RW");
    }
}
