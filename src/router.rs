use axum::{Router, http::HeaderValue};
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use crate::{AppState, config::Config, middleware::log_errors, routes};

/// 组装全部路由和中间件
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .merge(routes::auth::router())
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(log_errors))
                .layer(cors),
        )
        .with_state(state)
}

/// 只允许配置中的前端来源，`*` 表示回显任意来源
///
/// 携带凭据时 CORS 不允许通配符，方法和请求头按请求回显。
fn cors_layer(config: &Config) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    if config.cors_origins.iter().any(|o| o == "*") {
        return base.allow_origin(AllowOrigin::mirror_request());
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(AllowOrigin::list(origins))
}
