use async_trait::async_trait;
use sqlx::PgPool;

use super::UserStore;
use crate::database::models::user::UserRecord;

const SELECT_USER: &str = r#"
    SELECT
        uuid,
        playername,
        password AS password_hash,
        COALESCE("activeTG", FALSE) AS active_tg,
        chatid AS chat_id,
        username AS tg_username,
        firstname AS first_name,
        lastname AS last_name,
        COALESCE(admin, FALSE) AS admin
    FROM "AuthTGUsers"
"#;

/// 基于 Postgres 的用户存储库
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, sqlx::Error> {
        let sql = format!("{SELECT_USER} WHERE playername = $1 LIMIT 1");
        let user = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_by_chat_id(&self, chat_id: i64) -> Result<Option<UserRecord>, sqlx::Error> {
        let sql = format!("{SELECT_USER} WHERE chatid = $1 LIMIT 1");
        let user = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(chat_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }
}
