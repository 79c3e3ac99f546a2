/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - Bearer が必要な範囲 (protected) に identity middleware を route_layer で適用
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::identity::get_identity;
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new().route("/identity", get(get_identity));

    middleware::auth::identity::apply(protected, state)
}
