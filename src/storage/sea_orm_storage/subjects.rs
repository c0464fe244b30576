//! 科目存储操作

use super::SeaOrmStorage;
use crate::entity::subjects::{ActiveModel, Column, Entity as Subjects, Model};
use crate::errors::{Result, SrmsError};
use crate::models::subjects::entities::Subject;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// 按名称查找科目，不存在则创建；第二个值表示是否新建
pub(super) async fn find_or_create_subject<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<(Model, bool)> {
    let existing = Subjects::find()
        .filter(Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(|e| SrmsError::from_db("查询科目失败", e))?;

    if let Some(subject) = existing {
        return Ok((subject, false));
    }

    let subject = ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(|e| SrmsError::from_db("创建科目失败", e))?;

    Ok((subject, true))
}

impl SeaOrmStorage {
    /// 列出全部科目（按名称排序）
    pub async fn list_subjects_impl(&self) -> Result<Vec<Subject>> {
        let subjects = Subjects::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| SrmsError::from_db("查询科目列表失败", e))?;

        Ok(subjects.into_iter().map(|m| m.into_subject()).collect())
    }

    /// 创建科目
    pub async fn create_subject_impl(&self, name: &str) -> Result<(Subject, bool)> {
        match find_or_create_subject(&self.db, name).await {
            Ok((subject, created)) => Ok((subject.into_subject(), created)),
            // 并发创建同名科目时，唯一约束冲突说明科目已存在
            Err(e) if e.is_conflict() => {
                let (subject, _) = find_or_create_subject(&self.db, name).await?;
                Ok((subject.into_subject(), false))
            }
            Err(e) => Err(e),
        }
    }
}
