/// Factory: build the `Authorization` capability from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{Authorization, JwtAuthorization, KeyError};

pub fn build_authorization(config: &Config) -> Result<Arc<dyn Authorization>, AppError> {
    let auth = JwtAuthorization::new(&config.auth_signing_key, config.auth_token_leeway_seconds)
        .map_err(|err: KeyError| {
            tracing::error!(error = ?err, "failed to build token verifier");
            AppError::Internal
        })?;

    Ok(Arc::new(auth))
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use super::*;
    use crate::config::AppEnv;

    fn config_with_key(key: &str) -> Config {
        Config {
            addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            app_env: AppEnv::Development,
            auth_signing_key: key.to_string(),
            auth_token_leeway_seconds: 0,
            http_timeout_seconds: 30,
            http_body_limit_bytes: 1024,
        }
    }

    #[test]
    fn builds_verifier_from_signing_key() {
        assert!(build_authorization(&config_with_key("secret")).is_ok());
    }

    #[test]
    fn empty_key_is_an_internal_error() {
        let result = build_authorization(&config_with_key(""));
        assert!(matches!(result, Err(AppError::Internal)));
    }
}
