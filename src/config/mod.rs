use std::env;
use std::str::FromStr;

use chrono::{Duration, Utc};
use jsonwebtoken::Algorithm;

use crate::error::ConfigError;

const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60;
const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8000;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173";

/// 进程级配置，启动时读取一次，之后只读
#[derive(Debug, Clone)]
pub struct Config {
    pub secret_key: String,
    pub algorithm: Algorithm,
    /// 路由层签发令牌时使用的有效期，来自 `ACCESS_TOKEN_EXPIRE_MINUTES`
    pub access_token_ttl: Duration,
    /// 未配置时所有 Telegram 登录都会失败
    pub tg_bot_token: Option<String>,
    /// `auth_date` 的最大允许时长，未配置则不检查
    pub tg_auth_max_age: Option<Duration>,
    pub database_url: Option<String>,
    pub server_host: String,
    pub server_port: u16,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();

        let secret_key = required("SECRET_KEY")?;
        let algorithm = parse_algorithm(&required("ALGORITHM")?)?;

        let access_token_ttl = match optional("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(v) => parse_lifetime("ACCESS_TOKEN_EXPIRE_MINUTES", &v, Duration::try_minutes)?,
            None => Duration::minutes(DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES),
        };
        let tg_auth_max_age = optional("TG_AUTH_MAX_AGE_SECS")
            .map(|v| parse_lifetime("TG_AUTH_MAX_AGE_SECS", &v, Duration::try_seconds))
            .transpose()?;
        let server_port = match optional("SERVER_PORT") {
            Some(v) => parse_var("SERVER_PORT", &v)?,
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Config {
            secret_key,
            algorithm,
            access_token_ttl,
            tg_bot_token: optional("TG_BOT_TOKEN"),
            tg_auth_max_age,
            database_url: optional("DATABASE_URL"),
            server_host: optional("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.into()),
            server_port,
            cors_origins: split_origins(
                &optional("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.into()),
            ),
        })
    }

    /// 只含签名必需项的配置，其余字段取默认值
    pub fn new(secret_key: impl Into<String>, algorithm: Algorithm) -> Self {
        Config {
            secret_key: secret_key.into(),
            algorithm,
            access_token_ttl: Duration::minutes(DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES),
            tg_bot_token: None,
            tg_auth_max_age: None,
            database_url: None,
            server_host: DEFAULT_SERVER_HOST.into(),
            server_port: DEFAULT_SERVER_PORT,
            cors_origins: split_origins(DEFAULT_CORS_ORIGINS),
        }
    }
}

/// 只接受对称的 HMAC 算法，因为密钥是共享字符串
pub fn parse_algorithm(name: &str) -> Result<Algorithm, ConfigError> {
    let algorithm = Algorithm::from_str(name.trim())
        .map_err(|_| ConfigError::UnsupportedAlgorithm(name.to_string()))?;
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        _ => Err(ConfigError::UnsupportedAlgorithm(name.to_string())),
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    optional(name).ok_or(ConfigError::Missing(name))
}

// 空字符串视为未设置
fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

/// 正整数时长；超出 chrono 范围或加到当前时间后溢出都视为非法
fn parse_lifetime(
    name: &'static str,
    value: &str,
    unit: fn(i64) -> Option<Duration>,
) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::Invalid {
        name,
        value: value.to_string(),
    };
    let amount: i64 = parse_var(name, value)?;
    if amount <= 0 {
        return Err(invalid());
    }
    let lifetime = unit(amount).ok_or_else(invalid)?;
    Utc::now().checked_add_signed(lifetime).ok_or_else(invalid)?;
    Ok(lifetime)
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
