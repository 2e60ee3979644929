mod auth;
mod error_handler;

pub use auth::AuthSubject;
pub use error_handler::log_errors;
