use crate::errors::SrmsError;
use crate::storage::Storage;
use std::sync::Arc;
use tracing::{info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 输出当前数据规模
async fn report_dataset(storage: &Arc<dyn Storage>) {
    match storage.count_students().await {
        Ok(count) => info!("Database contains {} student(s)", count),
        Err(e) => warn!("Failed to count students: {}", e),
    }

    match storage.list_subjects().await {
        Ok(subjects) => info!("Database contains {} subject(s)", subjects.len()),
        Err(e) => warn!("Failed to list subjects: {}", e),
    }
}

/// 存储初始化失败时输出的提示
fn storage_failure_message(err: &SrmsError) -> String {
    format!("Failed to create storage backend: {}", err.format_simple())
}

/// 准备服务器启动的上下文
/// 包括存储连接与数据库迁移
pub async fn prepare_server_startup() -> StartupContext {
    let storage = crate::storage::create_storage()
        .await
        .unwrap_or_else(|e| {
            eprintln!("{}", storage_failure_message(&e));
            std::process::exit(1);
        });
    warn!("Storage backend initialized and migrations completed");

    report_dataset(&storage).await;

    StartupContext { storage }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_failure_message() {
        let err = SrmsError::database_connection("无法连接到数据库");
        let msg = storage_failure_message(&err);
        assert!(msg.starts_with("Failed to create storage backend"));
        assert!(msg.contains("Database Connection Error"));
        assert!(msg.contains("无法连接到数据库"));
    }
}
