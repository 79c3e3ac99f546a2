/*
 * Responsibility
 * - GET /api/v1/identity
 * - middleware が解決した user id をそのまま返す (token の疎通確認用)
 */
use axum::Json;

use crate::api::v1::{dto::identity::IdentityResponse, extractors::UserCtxExtractor};

pub async fn get_identity(UserCtxExtractor(ctx): UserCtxExtractor) -> Json<IdentityResponse> {
    Json(IdentityResponse {
        user_id: ctx.user_id,
    })
}
