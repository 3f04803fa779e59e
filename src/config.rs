use std::env;
use std::fmt;

const DEFAULT_DB_NAME: &str = "react-recipes";
const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;
const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Configuration error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Session token settings shared by the context middleware and the sign-in mutations
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub token_ttl_secs: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_uri: String,
    pub database_name: String,
    pub cors_origin: String,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Loads `variables.env` / `.env` (both optional) and reads the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::from_filename("variables.env").ok();
        dotenv::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mongo_uri = lookup("MONGO_URI")
            .ok_or_else(|| ConfigError("MONGO_URI must be set".to_string()))?;
        let secret = lookup("SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError("SECRET must be set".to_string()))?;

        let token_ttl_secs: i64 = parse_or("TOKEN_TTL_SECS", lookup("TOKEN_TTL_SECS"), 3600)?;
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&token_ttl_secs) {
            return Err(ConfigError(format!(
                "TOKEN_TTL_SECS must be between 1 and {}: {}",
                MAX_TOKEN_TTL_SECS, token_ttl_secs
            )));
        }

        let bcrypt_cost: u32 = parse_or("BCRYPT_COST", lookup("BCRYPT_COST"), 10)?;
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            return Err(ConfigError(format!(
                "BCRYPT_COST must be between {} and {}: {}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end(),
                bcrypt_cost
            )));
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", lookup("PORT"), 4444)?,
            database_name: database_name_from_uri(&mongo_uri),
            mongo_uri,
            cors_origin: lookup("CORS_ORIGIN")
                .unwrap_or_else(|| "http://localhost:3000".to_string()),
            auth: AuthConfig {
                secret,
                token_ttl_secs,
                bcrypt_cost,
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> Result<T, ConfigError> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError(format!("{} has an invalid value: {}", key, raw))),
        None => Ok(default),
    }
}

/// Extract database name from URI or use default
fn database_name_from_uri(uri: &str) -> String {
    let without_scheme = uri.split("://").nth(1).unwrap_or(uri);

    without_scheme
        .split_once('/')
        .map(|(_, path)| path.split('?').next().unwrap_or(""))
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DB_NAME)
        .to_string()
}
