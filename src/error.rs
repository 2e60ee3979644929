use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// 认证核心内部区分的失败类型
///
/// 对外边界会把其中多种合并为同一个响应，但日志和测试需要看到具体原因。
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("user not found")]
    UserNotFound,

    #[error("password does not match")]
    PasswordMismatch,

    #[error("account has no password set")]
    NoPasswordSet,

    #[error("widget signature does not match")]
    InvalidSignature,

    #[error("bot secret is not configured")]
    MissingBotSecret,

    #[error("widget payload has no hash")]
    MissingHash,

    #[error("widget auth_date is too old")]
    StaleAuthDate,

    #[error("no bearer token supplied")]
    MissingToken,

    #[error("token is malformed")]
    MalformedToken,

    #[error("token signature is invalid")]
    InvalidTokenSignature,

    #[error("token has expired")]
    Expired,

    #[error("token has no subject claim")]
    MissingSubjectClaim,

    #[error("token expiry is outside the representable time range")]
    ExpiryOutOfRange,

    #[error("failed to sign token: {0}")]
    TokenCreation(#[source] jsonwebtoken::errors::Error),
}

/// 启动阶段的配置错误，出现即终止进程
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("environment variable {0} must be set")]
    Missing(&'static str),

    #[error("environment variable {name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },

    #[error("signing algorithm {0} is not a symmetric HMAC algorithm")]
    UnsupportedAlgorithm(String),
}

/// HTTP 层错误
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// `/me` 中令牌有效但用户已不存在
    #[error("profile not found")]
    ProfileNotFound,

    /// 签名正确但该 Telegram 账号未绑定任何用户
    #[error("telegram account is not linked")]
    TelegramNotLinked,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Serialize)]
struct ErrorResponse {
    code: i32,
    error_message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Auth(err) => match err {
                AuthError::UserNotFound => (StatusCode::BAD_REQUEST, "用户不存在"),
                AuthError::PasswordMismatch | AuthError::NoPasswordSet => {
                    (StatusCode::BAD_REQUEST, "密码错误")
                }
                AuthError::InvalidSignature
                | AuthError::MissingBotSecret
                | AuthError::MissingHash
                | AuthError::StaleAuthDate => (StatusCode::FORBIDDEN, "Telegram 签名无效"),
                AuthError::MalformedToken
                | AuthError::InvalidTokenSignature
                | AuthError::Expired => (StatusCode::UNAUTHORIZED, "无法验证凭据"),
                AuthError::MissingSubjectClaim => (StatusCode::UNAUTHORIZED, "令牌无效"),
                AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "未授权访问"),
                AuthError::ExpiryOutOfRange => {
                    tracing::error!("Token lifetime overflows the time range");
                    (StatusCode::INTERNAL_SERVER_ERROR, "内部服务器错误")
                }
                AuthError::TokenCreation(e) => {
                    tracing::error!(error = %e, "Token signing failed");
                    (StatusCode::INTERNAL_SERVER_ERROR, "内部服务器错误")
                }
            },
            AppError::ProfileNotFound => (StatusCode::NOT_FOUND, "用户不存在"),
            AppError::TelegramNotLinked => (StatusCode::NOT_FOUND, "该 Telegram 账号未绑定任何账户"),
            AppError::Database(e) => {
                tracing::error!(error = %e, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "内部服务器错误")
            }
        };

        let mut response = (
            status,
            Json(ErrorResponse {
                code: status.as_u16() as i32,
                error_message: error_message.to_string(),
            }),
        )
            .into_response();

        if status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
        }

        response
    }
}
