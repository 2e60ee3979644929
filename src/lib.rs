use std::sync::Arc;

use auth::TokenService;
use config::Config;
use database::UserStore;

pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tokens: Arc<TokenService>,
    pub users: Arc<dyn UserStore>,
}

impl AppState {
    pub fn new(config: Config, users: Arc<dyn UserStore>) -> Self {
        let tokens = TokenService::new(&config);
        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            users,
        }
    }
}
