use axum::extract::{Json, State};
use chrono::Utc;

use crate::{
    AppState,
    auth::{check_password, check_widget, telegram::check_freshness, TelegramLoginPayload},
    error::{AppError, AppResult, AuthError},
    middleware::AuthSubject,
};

use super::model::{LoginRequest, ProfileResponse, TokenResponse};

/// 昵称 + 密码登录
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or_else(|| {
            tracing::warn!(username = %req.username, "Password login for unknown user");
            AuthError::UserNotFound
        })?;

    check_password(&req.password, user.password_hash.as_deref()).map_err(|e| {
        tracing::warn!(username = %req.username, reason = %e, "Password login rejected");
        e
    })?;

    issue_token(&state, user.username())
}

/// Telegram 登录组件登录，组件中的 `id` 对应账号表中的 chat id
#[axum::debug_handler]
pub async fn login_telegram(
    State(state): State<AppState>,
    Json(payload): Json<TelegramLoginPayload>,
) -> AppResult<Json<TokenResponse>> {
    check_widget(&payload, state.config.tg_bot_token.as_deref()).map_err(|e| {
        tracing::warn!(chat_id = payload.id, reason = %e, "Telegram login rejected");
        e
    })?;

    if let Some(max_age) = state.config.tg_auth_max_age {
        check_freshness(&payload, max_age, Utc::now()).map_err(|e| {
            tracing::warn!(
                chat_id = payload.id,
                auth_date = payload.auth_date,
                "Telegram login with stale auth_date"
            );
            e
        })?;
    }

    let user = state
        .users
        .find_by_chat_id(payload.id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(chat_id = payload.id, "Telegram account is not linked");
            AppError::TelegramNotLinked
        })?;

    issue_token(&state, user.username())
}

/// 根据令牌返回当前玩家资料
#[axum::debug_handler]
pub async fn me(
    State(state): State<AppState>,
    AuthSubject(username): AuthSubject,
) -> AppResult<Json<ProfileResponse>> {
    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or(AppError::ProfileNotFound)?;

    Ok(Json(ProfileResponse::from(user)))
}

fn issue_token(state: &AppState, username: &str) -> AppResult<Json<TokenResponse>> {
    let token = state
        .tokens
        .issue_for_subject(username, Some(state.config.access_token_ttl))?;

    tracing::info!(username, "Issued access token");
    Ok(Json(TokenResponse::bearer(token)))
}
