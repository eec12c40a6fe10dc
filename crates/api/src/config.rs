use std::str::FromStr;

/// Startup configuration problems. The binaries refuse to start on any of
/// these.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be set in the environment")]
    Missing { name: &'static str },

    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Session token settings.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// HMAC-SHA256 secret used to sign and verify session tokens.
    pub secret: String,
    /// Session lifetime in minutes (default: two weeks).
    pub expiry_mins: i64,
    /// Add `Secure` to the session cookie.
    pub cookie_secure: bool,
}

/// Server configuration loaded from environment variables.
///
/// Everything except `SESSION_SECRET` has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Articles shown on the news home page (default: `10`).
    pub news_count_on_home_page: usize,
    /// PostgreSQL URL. Without it the in-memory store is used.
    pub database_url: Option<String>,
    pub session: SessionConfig,
}

const DEFAULT_SESSION_EXPIRY_MINS: i64 = 60 * 24 * 14;

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                   | Default   |
    /// |---------------------------|-----------|
    /// | `HOST`                    | `0.0.0.0` |
    /// | `PORT`                    | `8000`    |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`      |
    /// | `NEWS_COUNT_ON_HOME_PAGE` | `10`      |
    /// | `DATABASE_URL`            | unset     |
    /// | `SESSION_SECRET`          | required  |
    /// | `SESSION_EXPIRY_MINS`     | `20160`   |
    /// | `SESSION_COOKIE_SECURE`   | `false`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 8000)?;
        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30)?;
        let news_count_on_home_page = parse_or(&lookup, "NEWS_COUNT_ON_HOME_PAGE", 10)?;
        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let secret = lookup("SESSION_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing {
                name: "SESSION_SECRET",
            })?;
        let session = SessionConfig {
            secret,
            expiry_mins: parse_or(&lookup, "SESSION_EXPIRY_MINS", DEFAULT_SESSION_EXPIRY_MINS)?,
            cookie_secure: parse_or(&lookup, "SESSION_COOKIE_SECURE", false)?,
        };

        Ok(Self {
            host,
            port,
            request_timeout_secs,
            news_count_on_home_page,
            database_url,
            session,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_only_secret_is_set() {
        let config = load(&[("SESSION_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.news_count_on_home_page, 10);
        assert!(config.database_url.is_none());
        assert_eq!(config.session.expiry_mins, 20160);
        assert!(!config.session.cookie_secure);
    }

    #[test]
    fn missing_secret_is_an_error() {
        assert_matches!(
            load(&[]),
            Err(ConfigError::Missing {
                name: "SESSION_SECRET"
            })
        );
    }

    #[test]
    fn invalid_number_names_the_variable() {
        assert_matches!(
            load(&[("SESSION_SECRET", "x"), ("PORT", "eighty")]),
            Err(ConfigError::Invalid { name: "PORT", ref value }) if value == "eighty"
        );
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("SESSION_SECRET", "x"),
            ("NEWS_COUNT_ON_HOME_PAGE", "5"),
            ("DATABASE_URL", "postgres://localhost/ya"),
            ("SESSION_COOKIE_SECURE", "true"),
        ])
        .unwrap();
        assert_eq!(config.news_count_on_home_page, 5);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/ya")
        );
        assert!(config.session.cookie_secure);
    }
}
