use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::UserStore;
use crate::database::models::user::UserRecord;

/// 进程内用户存储，用于测试和本地调试
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let store = Self::new();
        for user in users {
            store.insert(user);
        }
        store
    }

    /// 以昵称为键插入，已存在则覆盖
    pub fn insert(&self, user: UserRecord) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(user.playername.clone(), user);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.get(username).cloned())
    }

    async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<UserRecord>, sqlx::Error> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users
            .values()
            .find(|u| u.chat_id == Some(chat_id))
            .cloned())
    }
}
