/*
 * Responsibility
 * - token 文字列 → user id の解決 (Authorization capability)
 * - middleware はこの trait だけに依存する (JWT 実装 / テスト用 stub を差し替え可能)
 */
use thiserror::Error;

pub mod factory;
pub mod jwt;

pub use factory::build_authorization;
pub use jwt::{JwtAuthorization, KeyError};

/// Errors returned while resolving a token.
///
/// The `Display` text is what the client sees in the 401 body, so keep it short
/// and free of key material.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error(transparent)]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("{0}")]
    Rejected(String),
}

/// Resolves a bearer token to the numeric id of the user it was issued for.
pub trait Authorization: Send + Sync {
    fn parse_token(&self, token: &str) -> Result<i64, TokenError>;
}
