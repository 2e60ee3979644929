use async_trait::async_trait;

use crate::database::models::user::UserRecord;

pub mod memory;
pub mod user;

/// 认证流程依赖的用户查询能力
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, sqlx::Error>;

    async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<UserRecord>, sqlx::Error>;
}
