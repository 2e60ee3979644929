use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use crate::AppState;
use crate::error::{AppError, AuthError};

/// 从 `Authorization: Bearer <token>` 中解析出的令牌主体（玩家昵称）
#[derive(Debug, Clone)]
pub struct AuthSubject(pub String);

impl FromRequestParts<AppState> for AuthSubject {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AuthError::MissingToken)?;

        // 对外统一返回 401，日志里保留具体原因
        let subject = state.tokens.verify_subject(bearer.token()).map_err(|e| {
            tracing::warn!(reason = %e, "Rejected bearer token");
            e
        })?;

        Ok(AuthSubject(subject))
    }
}
