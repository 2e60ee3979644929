use sqlx::FromRow;

/// 旧账号库 `AuthTGUsers` 中的一行
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub uuid: String,
    /// 游戏内昵称，同时作为登录用户名和令牌主体
    pub playername: String,
    /// 旧方案的 SHA-256 十六进制摘要；仅绑定 Telegram 的账号没有密码
    pub password_hash: Option<String>,
    pub active_tg: bool,
    pub chat_id: Option<i64>,
    pub tg_username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub admin: bool,
}

impl UserRecord {
    pub fn username(&self) -> &str {
        &self.playername
    }

    pub fn is_admin(&self) -> bool {
        self.admin
    }

    pub fn is_chat_linked(&self) -> bool {
        self.active_tg
    }
}
