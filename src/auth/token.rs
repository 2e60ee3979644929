//! 访问令牌的签发与校验。
//!
//! 令牌是对称密钥签名的 JWT，除签名和 `exp` 之外没有任何服务端状态，
//! 所以无法吊销，只能等它过期。

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::{Map, Value};

use crate::config::Config;
use crate::error::AuthError;

/// 令牌中携带的声明集合
pub type Claims = Map<String, Value>;

pub const SUBJECT_CLAIM: &str = "sub";
pub const EXPIRY_CLAIM: &str = "exp";

/// 调用方不传有效期时使用，与配置中的 `ACCESS_TOKEN_EXPIRE_MINUTES` 相互独立
pub const DEFAULT_TTL_MINUTES: i64 = 15;

#[derive(Clone)]
pub struct TokenService {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    default_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        let secret = config.secret_key.as_bytes();
        Self {
            algorithm: config.algorithm,
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            default_ttl: Duration::minutes(DEFAULT_TTL_MINUTES),
        }
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// 签发令牌，`exp` 为当前 UTC 时间加上有效期，会覆盖调用方传入的同名声明
    pub fn issue(&self, claims: Claims, ttl: Option<Duration>) -> Result<String, AuthError> {
        self.issue_at(claims, ttl, Utc::now())
    }

    pub fn issue_for_subject(
        &self,
        subject: &str,
        ttl: Option<Duration>,
    ) -> Result<String, AuthError> {
        let mut claims = Claims::new();
        claims.insert(SUBJECT_CLAIM.into(), Value::String(subject.to_string()));
        self.issue(claims, ttl)
    }

    fn issue_at(
        &self,
        mut claims: Claims,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        let expire = now
            .checked_add_signed(ttl.unwrap_or(self.default_ttl))
            .ok_or(AuthError::ExpiryOutOfRange)?;
        claims.insert(EXPIRY_CLAIM.into(), Value::from(expire.timestamp()));

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(AuthError::TokenCreation)
    }

    /// 校验签名与有效期，成功时返回完整声明
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// 校验令牌并取出 `sub`
    pub fn verify_subject(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.verify(token)?;
        subject(&claims).map(str::to_string)
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, AuthError> {
        // 过期判断自己做：库的判断带宽限且在 now == exp 时仍视为有效
        let mut validation = Validation::new(self.algorithm);
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&[EXPIRY_CLAIM]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| classify(e.kind()))?
            .claims;

        let exp = claims
            .get(EXPIRY_CLAIM)
            .and_then(|v| v.as_i64().or_else(|| v.as_f64().map(|f| f as i64)))
            .ok_or(AuthError::MalformedToken)?;

        if now.timestamp() >= exp {
            return Err(AuthError::Expired);
        }

        Ok(claims)
    }
}

/// 取出主体声明；缺失或不是字符串都按无效令牌处理
pub fn subject(claims: &Claims) -> Result<&str, AuthError> {
    claims
        .get(SUBJECT_CLAIM)
        .and_then(Value::as_str)
        .ok_or(AuthError::MissingSubjectClaim)
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
            AuthError::InvalidTokenSignature
        }
        ErrorKind::ExpiredSignature => AuthError::Expired,
        _ => AuthError::MalformedToken,
    }
}
