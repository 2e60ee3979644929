//! 认证核心：密码摘要、访问令牌、Telegram 登录组件签名。
//!
//! 三者互不依赖，也不做任何 I/O，可在任意请求中并发调用。

pub mod password;
pub mod telegram;
pub mod token;

pub use password::{check_password, hash_password, verify_password};
pub use telegram::{TelegramLoginPayload, check_widget, verify_widget};
pub use token::{Claims, TokenService};
