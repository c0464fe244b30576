use std::sync::Arc;

use crate::models::{
    students::{
        entities::StudentRecord,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
    },
    subjects::entities::Subject,
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 学生管理方法
    // 创建学生及其成绩
    async fn create_student(&self, student: CreateStudentRequest) -> Result<StudentRecord>;
    // 通过ID获取学生及其成绩
    async fn get_student_by_id(&self, id: i64) -> Result<Option<StudentRecord>>;
    // 列出学生及其成绩
    async fn list_students(&self, query: StudentListQuery) -> Result<Vec<StudentRecord>>;
    // 更新学生信息，marks 存在时整体替换
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentRecord>>;
    // 删除学生（连同成绩）
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 统计学生数量
    async fn count_students(&self) -> Result<u64>;

    /// 科目管理方法
    // 列出全部科目（按名称排序）
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    // 创建科目（已存在则直接返回），第二个值表示是否新建
    async fn create_subject(&self, name: &str) -> Result<(Subject, bool)>;

    // 数据库连通性检查
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
