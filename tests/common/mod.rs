use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use jsonwebtoken::Algorithm;
use tower::ServiceExt;

use tg_auth_backend::AppState;
use tg_auth_backend::auth::telegram::{data_check_string, sign_check_string};
use tg_auth_backend::auth::{TokenService, hash_password};
use tg_auth_backend::config::Config;
use tg_auth_backend::database::{MemoryUserStore, UserRecord};
use tg_auth_backend::router::create_router;

pub const SECRET: &str = "test-secret-that-is-long-enough-for-hmac";
pub const BOT_TOKEN: &str = "123456:TEST-bot-token";
pub const PASSWORD: &str = "correct-horse-battery-staple";

/// 测试用配置：HS256，配置了机器人令牌
pub fn test_config() -> Config {
    let mut config = Config::new(SECRET, Algorithm::HS256);
    config.tg_bot_token = Some(BOT_TOKEN.to_string());
    config
}

pub fn token_service() -> TokenService {
    TokenService::new(&test_config())
}

/// 有密码、绑定了 Telegram 的管理员
pub fn steve() -> UserRecord {
    UserRecord {
        uuid: "0f8fad5b-d9cb-469f-a165-70867728950e".to_string(),
        playername: "Steve".to_string(),
        password_hash: Some(hash_password(PASSWORD)),
        active_tg: true,
        chat_id: Some(12345),
        tg_username: Some("steve_mc".to_string()),
        first_name: Some("Steve".to_string()),
        last_name: None,
        admin: true,
    }
}

/// 只通过 Telegram 登录、没有密码的玩家
pub fn alex() -> UserRecord {
    UserRecord {
        uuid: "7c9e6679-7425-40de-944b-e07fc1f90ae7".to_string(),
        playername: "Alex".to_string(),
        password_hash: None,
        active_tg: true,
        chat_id: Some(777),
        tg_username: None,
        first_name: None,
        last_name: None,
        admin: false,
    }
}

pub fn build_app(config: Config) -> Router {
    let store = MemoryUserStore::with_users([steve(), alex()]);
    create_router(AppState::new(config, Arc::new(store)))
}

pub fn build_test_app() -> Router {
    build_app(test_config())
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

/// 按登录组件的方式签名，只包含给出的字段
pub fn signed_widget(chat_id: i64, first_name: Option<&str>, auth_date: i64) -> serde_json::Value {
    let mut fields = vec![
        ("id".to_string(), chat_id.to_string()),
        ("auth_date".to_string(), auth_date.to_string()),
    ];
    if let Some(name) = first_name {
        fields.push(("first_name".to_string(), name.to_string()));
    }
    let hash = sign_check_string(&data_check_string(fields.clone()), BOT_TOKEN);

    let mut body = serde_json::Map::new();
    body.insert("id".into(), chat_id.into());
    body.insert("auth_date".into(), auth_date.into());
    if let Some(name) = first_name {
        body.insert("first_name".into(), name.into());
    }
    body.insert("hash".into(), hash.into());
    serde_json::Value::Object(body)
}
