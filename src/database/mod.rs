// 数据库模块
// 只负责按昵称或 Telegram chat id 查询用户，账号的写入由其它服务完成

pub mod models;
pub mod repositories;

pub use models::user::UserRecord;
pub use repositories::UserStore;
pub use repositories::memory::MemoryUserStore;
pub use repositories::user::PgUserStore;
