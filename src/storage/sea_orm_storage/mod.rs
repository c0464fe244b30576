//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod students;
mod subjects;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{Result, SrmsError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, &config.database).await?
        } else {
            Self::connect_generic(&db_url, &config.database).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 基于已有连接创建存储实例并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| SrmsError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// 内存 SQLite，单连接保证所有查询落在同一个库上
    pub async fn in_memory() -> Result<Self> {
        let mut opt = ConnectOptions::new("sqlite::memory:");
        opt.max_connections(1)
            .min_connections(1)
            .sqlx_logging(false);

        let db = Database::connect(opt)
            .await
            .map_err(|e| SrmsError::database_connection(format!("内存数据库连接失败: {e}")))?;

        Self::from_connection(db).await
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SrmsError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-16000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SrmsError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SrmsError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SrmsError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    students::{
        entities::StudentRecord,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    subjects::entities::Subject,
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 学生模块
    async fn create_student(&self, student: CreateStudentRequest) -> Result<StudentRecord> {
        self.create_student_impl(student).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<StudentRecord>> {
        self.get_student_by_id_impl(id).await
    }

    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<StudentRecord>> {
        self.list_students_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentRecord>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn count_students(&self) -> Result<u64> {
        self.count_students_impl().await
    }

    // 科目模块
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        self.list_subjects_impl().await
    }

    async fn create_subject(&self, name: &str) -> Result<(Subject, bool)> {
        self.create_subject_impl(name).await
    }

    async fn ping(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| SrmsError::database_connection(format!("数据库不可用: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("students.db").unwrap(),
            "sqlite://students.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("sqlite://data/app.sqlite").unwrap(),
            "sqlite://data/app.sqlite"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url(":memory:").unwrap(),
            "sqlite::memory:"
        );
        assert!(SeaOrmStorage::build_database_url("postgres://localhost/srms").is_ok());
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[tokio::test]
    async fn test_in_memory_storage_migrates() {
        let storage = SeaOrmStorage::in_memory().await.unwrap();
        storage.ping().await.unwrap();
        assert_eq!(storage.count_students().await.unwrap(), 0);
        assert!(storage.list_subjects().await.unwrap().is_empty());
    }
}
