//! Bearer token 検証 → UserCtx を extensions に入れる
//!
//! - `Authorization: Bearer <token>` を読み、token を `Authorization` capability に渡す
//! - 成功時は解決した user id を `UserCtx` として request extensions に格納し、次の handler へ
//! - 失敗時は 401 `{"message": ...}` を返し、後続の handler は実行しない

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};
use thiserror::Error;

use crate::api::v1::extractors::UserCtx;
use crate::error::AppError;
use crate::services::auth::{Authorization, TokenError};
use crate::state::AppState;

const BEARER_SCHEME: &str = "Bearer";

/// Reasons a request is refused by the identity middleware.
///
/// The first three messages are fixed; `Token` echoes the token service's
/// error text unchanged.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("empty auth header")]
    EmptyHeader,
    #[error("invalid auth header")]
    InvalidHeader,
    #[error("token is empty")]
    EmptyToken,
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// 保護対象の Router に identity middleware を掛ける。
///
/// 例：
/// ```ignore
/// let protected = Router::new().route("/identity", get(get_identity));
/// let protected = middleware::auth::identity::apply(protected, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // route_layer: マッチしなかったパスは 401 ではなく 404 のまま
    router.route_layer(middleware::from_fn_with_state(state, identity_middleware))
}

async fn identity_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user_id = match authenticate(state.auth.as_ref(), req.headers()) {
        Ok(user_id) => user_id,
        Err(err) => {
            // token 自体はログに出さない
            tracing::warn!(
                reason = %err,
                method = %req.method(),
                path = %req.uri().path(),
                "request rejected by identity middleware"
            );
            return Err(err.into());
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(UserCtx::new(user_id));

    Ok(next.run(req).await)
}

/// Resolve the caller's user id from the request headers.
pub fn authenticate(auth: &dyn Authorization, headers: &HeaderMap) -> Result<i64, IdentityError> {
    let token = bearer_token(headers)?;
    Ok(auth.parse_token(token)?)
}

/// Extract the token part of `Authorization: Bearer <token>`.
///
/// The value must split on a single space into exactly two fields and the
/// scheme is matched case-sensitively. Header *names* are case-insensitive
/// because `HeaderMap` normalises them.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, IdentityError> {
    let value = match headers.get(header::AUTHORIZATION) {
        None => return Err(IdentityError::EmptyHeader),
        Some(v) if v.is_empty() => return Err(IdentityError::EmptyHeader),
        Some(v) => v.to_str().map_err(|_| IdentityError::InvalidHeader)?,
    };

    let mut parts = value.split(' ');
    let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(IdentityError::InvalidHeader);
    };

    if scheme != BEARER_SCHEME {
        return Err(IdentityError::InvalidHeader);
    }

    if token.trim().is_empty() {
        return Err(IdentityError::EmptyToken);
    }

    Ok(token)
}
