/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: token → user id を解決する Authorization capability
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::services::auth::Authorization;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<dyn Authorization>,
}

impl AppState {
    pub fn new(auth: Arc<dyn Authorization>) -> Self {
        Self { auth }
    }
}
