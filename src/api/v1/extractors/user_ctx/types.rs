/*
 * Responsibility
 * - Handler から見える「認証済みユーザー」の型
 * - middleware が token を検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - token の解釈は services::auth (Authorization) の責務
 */

/// 認証済みのリクエストに付与されるコンテキスト
///
/// - `user_id` は Authorization capability が token から解決した内部ユーザーID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserCtx {
    pub user_id: i64,
}

impl UserCtx {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}
