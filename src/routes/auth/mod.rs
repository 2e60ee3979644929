use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

pub mod handler;
pub mod model;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(handler::login))
        .route("/auth/telegram", post(handler::login_telegram))
        .route("/me", get(handler::me))
}
