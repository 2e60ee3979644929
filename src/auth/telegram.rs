//! Telegram Login Widget 数据校验。
//!
//! 算法由 Telegram 规定：除 `hash` 外的所有字段按 `key=value` 格式化、
//! 整串排序后用换行拼接，再以 `SHA256(bot_token)` 为密钥做 HMAC-SHA256，
//! 结果的小写十六进制应与 `hash` 完全一致。

use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AuthError;

type HmacSha256 = Hmac<Sha256>;

/// 登录组件回传的数据
///
/// 可选字段缺失时必须保持缺失：序列化成 `null` 会改变校验串，
/// 导致所有合法签名都校验失败。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramLoginPayload {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub auth_date: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl TelegramLoginPayload {
    /// 参与签名的字段，已去掉 `hash` 和缺失的可选字段
    pub fn signed_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("id", self.id.to_string()),
            ("auth_date", self.auth_date.to_string()),
        ];
        let optional = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("username", &self.username),
            ("photo_url", &self.photo_url),
        ];
        fields.extend(
            optional
                .into_iter()
                .filter_map(|(name, value)| value.as_ref().map(|v| (name, v.clone()))),
        );
        fields
    }

    pub fn auth_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.auth_date, 0)
    }
}

/// 构造校验串：`key=value` 按整串升序排列后以 `\n` 连接
pub fn data_check_string<K, V, I>(fields: I) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
    I: IntoIterator<Item = (K, V)>,
{
    let mut lines: Vec<String> = fields
        .into_iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
        .collect();
    lines.sort();
    lines.join("\n")
}

fn signer(bot_token: &str) -> HmacSha256 {
    let secret_key = Sha256::digest(bot_token.as_bytes());
    HmacSha256::new_from_slice(&secret_key).expect("HMAC accepts any key length")
}

/// 对校验串签名，返回小写十六进制
pub fn sign_check_string(check_string: &str, bot_token: &str) -> String {
    let mut mac = signer(bot_token);
    mac.update(check_string.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// 校验组件数据，区分具体的失败原因
pub fn check_widget(
    payload: &TelegramLoginPayload,
    bot_token: Option<&str>,
) -> Result<(), AuthError> {
    let bot_token = match bot_token {
        Some(t) if !t.is_empty() => t,
        _ => return Err(AuthError::MissingBotSecret),
    };
    let provided = match payload.hash.as_deref() {
        Some(h) if !h.is_empty() => h,
        _ => return Err(AuthError::MissingHash),
    };

    // 只有规范的小写十六进制才可能与计算结果逐字节相等
    if !provided
        .bytes()
        .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    {
        return Err(AuthError::InvalidSignature);
    }
    let provided = hex::decode(provided).map_err(|_| AuthError::InvalidSignature)?;

    let check_string = data_check_string(payload.signed_fields());
    let mut mac = signer(bot_token);
    mac.update(check_string.as_bytes());
    mac.verify_slice(&provided)
        .map_err(|_| AuthError::InvalidSignature)
}

pub fn verify_widget(payload: &TelegramLoginPayload, bot_token: Option<&str>) -> bool {
    check_widget(payload, bot_token).is_ok()
}

/// `auth_date` 距今不超过 `max_age`；未来时间同样拒绝
pub fn check_freshness(
    payload: &TelegramLoginPayload,
    max_age: Duration,
    now: DateTime<Utc>,
) -> Result<(), AuthError> {
    let auth_time = payload.auth_time().ok_or(AuthError::StaleAuthDate)?;
    let age = now - auth_time;
    if age < Duration::zero() || age > max_age {
        return Err(AuthError::StaleAuthDate);
    }
    Ok(())
}
