mod user_ctx;

pub use user_ctx::{UserCtx, UserCtxExtractor};
