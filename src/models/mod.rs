pub mod common;
pub mod students;
pub mod subjects;
pub mod system;

pub use common::{ErrorResponse, MessageResponse};

/// 程序启动时间，用于计算运行时长
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
