use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::UserCtx;

/// Handler で、 UserCtx を受け取るための extractor
/// middleware が UserCtx を request.extensions() に insert 済みである前提
/// 見つからない場合は 500 を返す（ミドルウェア未設定のルートで使われている）
pub struct UserCtxExtractor(pub UserCtx);

impl<S> FromRequestParts<S> for UserCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<UserCtx>()
            .copied()
            .map(UserCtxExtractor)
            .ok_or_else(|| {
                tracing::error!(path = %parts.uri.path(), "user id not found in request context");
                AppError::UserIdNotFound
            })
    }
}
