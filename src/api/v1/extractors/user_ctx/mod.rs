/*!
 * Authenticated user extractor
 *
 * Responsibility:
 * - 認証済みリクエストのコンテキスト（UserCtx）を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - UserCtx
 * - UserCtxExtractor
 */

mod core;
mod types;

pub use core::UserCtxExtractor;
pub use types::UserCtx;
