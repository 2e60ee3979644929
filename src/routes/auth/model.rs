use serde::{Deserialize, Serialize};

use crate::database::UserRecord;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

impl TokenResponse {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}

/// `GET /me` 返回的玩家资料
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub playername: String,
    pub uuid: String,
    #[serde(rename = "activeTG")]
    pub active_tg: bool,
    pub tg_username: Option<String>,
    pub admin: bool,
}

impl From<UserRecord> for ProfileResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            playername: user.playername,
            uuid: user.uuid,
            active_tg: user.active_tg,
            tg_username: user.tg_username,
            admin: user.admin,
        }
    }
}
