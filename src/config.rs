/*
 * Responsibility
 * - 環境変数の読み込み (PORT, APP_ENV, AUTH_SIGNING_KEY など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    // HMAC key the token service signed access tokens with
    pub auth_signing_key: String,
    pub auth_token_leeway_seconds: u64,

    pub http_timeout_seconds: u64,
    pub http_body_limit_bytes: usize,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("auth_token_leeway_seconds", &self.auth_token_leeway_seconds)
            .field("http_timeout_seconds", &self.http_timeout_seconds)
            .field("http_body_limit_bytes", &self.http_body_limit_bytes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key → value source (process env in production).
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = parse_or(&lookup, "PORT", 8000)?;

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(
            &lookup("APP_ENV").unwrap_or_else(|| "development".to_string()),
        );

        let auth_signing_key =
            lookup("AUTH_SIGNING_KEY").ok_or(ConfigError::Missing("AUTH_SIGNING_KEY"))?;
        if auth_signing_key.trim().is_empty() {
            return Err(ConfigError::Invalid("AUTH_SIGNING_KEY"));
        }

        let auth_token_leeway_seconds = parse_or(&lookup, "AUTH_TOKEN_LEEWAY_SECONDS", 60)?;
        let http_timeout_seconds = parse_or(&lookup, "HTTP_TIMEOUT_SECONDS", 30)?;
        let http_body_limit_bytes = parse_or(&lookup, "HTTP_BODY_LIMIT_BYTES", 1024 * 1024)?;

        Ok(Self {
            addr,
            app_env,
            auth_signing_key,
            auth_token_leeway_seconds,
            http_timeout_seconds,
            http_body_limit_bytes,
        })
    }
}

// 未設定ならデフォルト、設定されていてパースできなければ起動失敗
fn parse_or<T: FromStr>(
    lookup: impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(key) {
        Some(v) => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}
