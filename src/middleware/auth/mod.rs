/*
 * Responsibility
 * - 認証系 middleware の公開インターフェース
 */
pub mod identity;

pub use identity::IdentityError;
