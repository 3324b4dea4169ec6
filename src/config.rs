use thiserror::Error;

/// Upper bound for `JWT_EXPIRATION_SECONDS`: ten years.
pub const MAX_JWT_EXPIRATION_SECONDS: i64 = 10 * 365 * 24 * 60 * 60;
/// Upper bound for `INVITATION_TTL_HOURS`: ten years.
pub const MAX_INVITATION_TTL_HOURS: i64 = 10 * 365 * 24;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

/// Runtime configuration read from the process environment.
///
/// # Variables
/// - `HOST` (default `127.0.0.1`) and `PORT` (default `8080`)
/// - `JWT_SECRET` (required): HS256 signing secret for the `jwt` strategy
/// - `JWT_EXPIRATION_SECONDS` (default `86400`, at most ten years): lifetime of issued access tokens
/// - `INVITATION_TTL_HOURS` (default `72`, at most ten years): how long an invitation stays acceptable
/// - `ENABLE_PLAYGROUND` (default `true`): mount the GraphQL playground
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expiration_seconds: i64,
    pub invitation_ttl_hours: i64,
    pub enable_playground: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = match lookup("PORT") {
            Some(v) => v.parse::<u16>().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let jwt_secret = lookup("JWT_SECRET")
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET"))?;

        let jwt_expiration_seconds = parse_bounded(
            &lookup,
            "JWT_EXPIRATION_SECONDS",
            86_400,
            MAX_JWT_EXPIRATION_SECONDS,
        )?;
        let invitation_ttl_hours =
            parse_bounded(&lookup, "INVITATION_TTL_HOURS", 72, MAX_INVITATION_TTL_HOURS)?;

        let enable_playground = match lookup("ENABLE_PLAYGROUND")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("true") | Some("1") | Some("yes") => true,
            Some("false") | Some("0") | Some("no") => false,
            Some(_) => return Err(ConfigError::Invalid("ENABLE_PLAYGROUND")),
        };

        Ok(Self {
            host,
            port,
            jwt_secret,
            jwt_expiration_seconds,
            invitation_ttl_hours,
            enable_playground,
        })
    }
}

/// Parses `key` as an integer in `1..=max`, falling back to `default` when unset.
fn parse_bounded<F>(
    lookup: &F,
    key: &'static str,
    default: i64,
    max: i64,
) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) => match v.trim().parse::<i64>() {
            Ok(n) if n > 0 && n <= max => Ok(n),
            _ => Err(ConfigError::Invalid(key)),
        },
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_only_secret() {
        let config = Config::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.jwt_expiration_seconds, 86_400);
        assert_eq!(config.invitation_ttl_hours, 72);
        assert!(config.enable_playground);
    }

    #[test]
    fn test_missing_secret() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_blank_secret_is_missing() {
        let result = Config::from_lookup(lookup_from(&[("JWT_SECRET", "   ")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("JWT_SECRET"));
    }

    #[test]
    fn test_invalid_port() {
        let result = Config::from_lookup(lookup_from(&[("JWT_SECRET", "x"), ("PORT", "http")]));
        assert_eq!(result.unwrap_err(), ConfigError::Invalid("PORT"));
    }

    #[test]
    fn test_non_positive_expiration() {
        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "x"),
            ("JWT_EXPIRATION_SECONDS", "0"),
        ]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid("JWT_EXPIRATION_SECONDS")
        );
    }

    #[test]
    fn test_upper_bounds() {
        let at_max = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "x"),
            ("JWT_EXPIRATION_SECONDS", MAX_JWT_EXPIRATION_SECONDS.to_string().as_str()),
            ("INVITATION_TTL_HOURS", MAX_INVITATION_TTL_HOURS.to_string().as_str()),
        ]))
        .unwrap();
        assert_eq!(at_max.jwt_expiration_seconds, MAX_JWT_EXPIRATION_SECONDS);
        assert_eq!(at_max.invitation_ttl_hours, MAX_INVITATION_TTL_HOURS);

        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "x"),
            ("INVITATION_TTL_HOURS", i64::MAX.to_string().as_str()),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::Invalid("INVITATION_TTL_HOURS"));

        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "x"),
            ("JWT_EXPIRATION_SECONDS", (MAX_JWT_EXPIRATION_SECONDS + 1).to_string().as_str()),
        ]));
        assert_eq!(
            result.unwrap_err(),
            ConfigError::Invalid("JWT_EXPIRATION_SECONDS")
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "x"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
            ("INVITATION_TTL_HOURS", "1"),
            ("ENABLE_PLAYGROUND", "False"),
        ]))
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.invitation_ttl_hours, 1);
        assert!(!config.enable_playground);
    }

    #[test]
    fn test_invalid_playground_flag() {
        let result = Config::from_lookup(lookup_from(&[
            ("JWT_SECRET", "x"),
            ("ENABLE_PLAYGROUND", "maybe"),
        ]));
        assert_eq!(result.unwrap_err(), ConfigError::Invalid("ENABLE_PLAYGROUND"));
    }
}
