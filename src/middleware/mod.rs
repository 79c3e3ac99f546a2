/*
 * Responsibility
 * - middleware の公開インターフェース
 * - http: 全ルート共通 (request id / trace / limit / timeout)
 * - auth: 保護ルート用 (Bearer → UserCtx)
 */
pub mod auth;
pub mod http;
