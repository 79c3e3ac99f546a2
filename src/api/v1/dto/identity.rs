use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub user_id: i64,
}
