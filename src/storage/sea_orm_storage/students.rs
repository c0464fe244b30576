//! 学生与成绩存储操作
//!
//! 创建、更新与删除都在同一个事务中完成，
//! 更新成绩时的「先删除再重新插入」对并发读者不可见。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::marks::Column as MarkColumn;
use crate::entity::prelude::{MarkActiveModel, Marks, StudentActiveModel, Students, Subjects};
use crate::entity::students::Column;
use crate::errors::{Result, SrmsError};
use crate::models::students::{
    entities::{Mark, StudentRecord},
    requests::{CreateStudentRequest, MarkInput, StudentListQuery, UpdateStudentRequest},
};
use crate::utils::escape_like_pattern;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 单条 IN 查询绑定的学生 ID 上限，低于 SQLite 的参数数量限制
const MARKS_QUERY_CHUNK: usize = 500;

/// 批量读取若干学生的成绩（关联科目名称），按插入顺序返回
async fn load_marks<C: ConnectionTrait>(
    conn: &C,
    student_ids: &[i64],
) -> Result<HashMap<i64, Vec<Mark>>> {
    let mut grouped: HashMap<i64, Vec<Mark>> = HashMap::new();

    // 每个学生只落在一个分块里，分块内按成绩 ID 排序即可保持插入顺序
    for chunk in student_ids.chunks(MARKS_QUERY_CHUNK) {
        let rows = Marks::find()
            .filter(MarkColumn::StudentId.is_in(chunk.iter().copied()))
            .order_by_asc(MarkColumn::Id)
            .find_also_related(Subjects)
            .all(conn)
            .await
            .map_err(|e| SrmsError::from_db("查询成绩失败", e))?;

        for (mark, subject) in rows {
            let student_id = mark.student_id;
            let subject_name = subject.map(|s| s.name).unwrap_or_default();
            grouped
                .entry(student_id)
                .or_default()
                .push(mark.into_mark(subject_name));
        }
    }

    Ok(grouped)
}

/// 读取单个学生及其成绩
async fn find_record<C: ConnectionTrait>(conn: &C, id: i64) -> Result<Option<StudentRecord>> {
    let Some(student) = Students::find_by_id(id)
        .one(conn)
        .await
        .map_err(|e| SrmsError::from_db("查询学生失败", e))?
    else {
        return Ok(None);
    };

    let marks = load_marks(conn, &[id])
        .await?
        .remove(&id)
        .unwrap_or_default();

    Ok(Some(StudentRecord {
        student: student.into_student(),
        marks,
    }))
}

/// 插入一组成绩，科目不存在时先创建
async fn insert_marks<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    marks: &[MarkInput],
) -> Result<()> {
    for mark in marks {
        let (subject, _) = super::subjects::find_or_create_subject(conn, &mark.subject).await?;
        let subject_id = subject.id;

        MarkActiveModel {
            student_id: Set(student_id),
            subject_id: Set(subject_id),
            marks_obtained: Set(mark.marks_obtained),
            max_marks: Set(mark.resolved_max_marks()),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| SrmsError::from_db("写入成绩失败", e))?;
    }

    Ok(())
}

impl SeaOrmStorage {
    /// 创建学生及其成绩
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<StudentRecord> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SrmsError::from_db("开启事务失败", e))?;

        let student = StudentActiveModel {
            name: Set(req.name),
            roll_number: Set(req.roll_number),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SrmsError::from_db("创建学生失败", e))?;

        insert_marks(&txn, student.id, &req.marks).await?;

        let marks = load_marks(&txn, &[student.id])
            .await?
            .remove(&student.id)
            .unwrap_or_default();

        txn.commit()
            .await
            .map_err(|e| SrmsError::from_db("提交事务失败", e))?;

        Ok(StudentRecord {
            student: student.into_student(),
            marks,
        })
    }

    /// 通过 ID 获取学生及其成绩
    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<StudentRecord>> {
        find_record(&self.db, id).await
    }

    /// 列出学生（按 ID 升序），成绩一次性批量读取
    pub async fn list_students_impl(&self, query: StudentListQuery) -> Result<Vec<StudentRecord>> {
        let mut select = Students::find();

        // 搜索条件：姓名或学号包含关键字
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let pattern = format!("%{}%", escape_like_pattern(search.trim()));
            select = select.filter(
                Condition::any()
                    .add(Column::Name.like(LikeExpr::new(pattern.clone()).escape('\\')))
                    .add(Column::RollNumber.like(LikeExpr::new(pattern).escape('\\'))),
            );
        }

        let students = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SrmsError::from_db("查询学生列表失败", e))?;

        let ids: Vec<i64> = students.iter().map(|s| s.id).collect();
        let mut marks = load_marks(&self.db, &ids).await?;

        Ok(students
            .into_iter()
            .map(|student| StudentRecord {
                marks: marks.remove(&student.id).unwrap_or_default(),
                student: student.into_student(),
            })
            .collect())
    }

    /// 更新学生信息；marks 存在时删除全部旧成绩并重新写入
    ///
    /// 事务内第一条语句必须是写操作：SQLite 延迟事务先读后写时，
    /// 并发写入会直接返回 `database is locked`。
    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<StudentRecord>> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SrmsError::from_db("开启事务失败", e))?;

        let mut stmt = Students::update_many().col_expr(Column::UpdatedAt, Expr::value(now));
        if let Some(name) = update.name {
            stmt = stmt.col_expr(Column::Name, Expr::value(name));
        }
        if let Some(roll_number) = update.roll_number {
            stmt = stmt.col_expr(Column::RollNumber, Expr::value(roll_number));
        }

        let result = stmt
            .filter(Column::Id.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SrmsError::from_db("更新学生失败", e))?;
        if result.rows_affected == 0 {
            return Ok(None);
        }

        if let Some(marks) = update.marks {
            Marks::delete_many()
                .filter(MarkColumn::StudentId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SrmsError::from_db("删除旧成绩失败", e))?;

            insert_marks(&txn, id, &marks).await?;
        }

        // 在事务内读取结果，避免提交后被并发删除
        let record = find_record(&txn, id).await?;

        txn.commit()
            .await
            .map_err(|e| SrmsError::from_db("提交事务失败", e))?;

        Ok(record)
    }

    /// 删除学生及其成绩
    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SrmsError::from_db("开启事务失败", e))?;

        Marks::delete_many()
            .filter(MarkColumn::StudentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| SrmsError::from_db("删除成绩失败", e))?;

        let result = Students::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SrmsError::from_db("删除学生失败", e))?;

        txn.commit()
            .await
            .map_err(|e| SrmsError::from_db("提交事务失败", e))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计学生数量
    pub async fn count_students_impl(&self) -> Result<u64> {
        Students::find()
            .count(&self.db)
            .await
            .map_err(|e| SrmsError::from_db("统计学生数量失败", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::Grade;
    use crate::models::students::responses::StudentResultResponse;

    fn mark(subject: &str, marks_obtained: f64, max_marks: Option<f64>) -> MarkInput {
        MarkInput {
            subject: subject.to_string(),
            marks_obtained,
            max_marks,
        }
    }

    fn new_student(name: &str, roll_number: &str, marks: Vec<MarkInput>) -> CreateStudentRequest {
        CreateStudentRequest {
            name: name.to_string(),
            roll_number: roll_number.to_string(),
            marks,
        }
    }

    async fn storage() -> SeaOrmStorage {
        SeaOrmStorage::in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_returns_same_fields() {
        let storage = storage().await;
        let created = storage
            .create_student_impl(new_student(
                "Ada",
                "R-001",
                vec![mark("Math", 85.0, Some(100.0)), mark("Physics", 40.0, Some(50.0))],
            ))
            .await
            .unwrap();

        let fetched = storage
            .get_student_by_id_impl(created.student.id)
            .await
            .unwrap()
            .expect("student should exist");

        assert_eq!(fetched.student.name, "Ada");
        assert_eq!(fetched.student.roll_number, "R-001");
        assert_eq!(fetched.marks, created.marks);
        assert_eq!(fetched.marks.len(), 2);
        assert_eq!(fetched.marks[0].subject, "Math");
        assert_eq!(fetched.marks[1].max_marks, 50.0);

        let result = StudentResultResponse::from(fetched);
        assert_eq!(result.total_obtained, 125.0);
        assert_eq!(result.total_max, 150.0);
        assert_eq!(result.percentage, 83.33);
        assert_eq!(result.grade, Grade::B);
    }

    #[tokio::test]
    async fn test_default_max_marks() {
        let storage = storage().await;
        let created = storage
            .create_student_impl(new_student(
                "Bo",
                "R-002",
                vec![mark("Math", 50.0, None), mark("Art", 30.0, Some(0.0))],
            ))
            .await
            .unwrap();

        assert!(created.marks.iter().all(|m| m.max_marks == 100.0));
    }

    #[tokio::test]
    async fn test_duplicate_roll_number_is_conflict() {
        let storage = storage().await;
        storage
            .create_student_impl(new_student("Ada", "R-001", vec![]))
            .await
            .unwrap();

        let err = storage
            .create_student_impl(new_student("Eve", "R-001", vec![mark("Math", 1.0, None)]))
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        // 失败的事务不能留下任何数据
        assert_eq!(storage.count_students_impl().await.unwrap(), 1);
        assert!(storage.list_subjects_impl().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_subjects_are_shared_between_students() {
        let storage = storage().await;
        storage
            .create_student_impl(new_student("Ada", "R-001", vec![mark("Math", 90.0, None)]))
            .await
            .unwrap();
        storage
            .create_student_impl(new_student(
                "Bo",
                "R-002",
                vec![mark("Math", 70.0, None), mark("Biology", 60.0, None)],
            ))
            .await
            .unwrap();

        let names: Vec<String> = storage
            .list_subjects_impl()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Biology", "Math"]);
    }

    #[tokio::test]
    async fn test_list_students_with_marks_and_search() {
        let storage = storage().await;
        storage
            .create_student_impl(new_student("Ada", "R-001", vec![mark("Math", 90.0, None)]))
            .await
            .unwrap();
        storage
            .create_student_impl(new_student("Bob", "X_100", vec![]))
            .await
            .unwrap();

        let all = storage
            .list_students_impl(StudentListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].student.name, "Ada");
        assert_eq!(all[0].marks.len(), 1);
        assert!(all[1].marks.is_empty());

        let found = storage
            .list_students_impl(StudentListQuery {
                search: Some("x_1".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].student.roll_number, "X_100");

        // 通配符按字面匹配
        let none = storage
            .list_students_impl(StudentListQuery {
                search: Some("%".to_string()),
            })
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_mark_set() {
        let storage = storage().await;
        let created = storage
            .create_student_impl(new_student(
                "Ada",
                "R-001",
                vec![mark("Math", 90.0, None), mark("Physics", 80.0, None)],
            ))
            .await
            .unwrap();
        let id = created.student.id;

        let updated = storage
            .update_student_impl(
                id,
                UpdateStudentRequest {
                    name: Some("Ada L.".to_string()),
                    roll_number: None,
                    marks: Some(vec![mark("Chemistry", 55.0, Some(60.0))]),
                },
            )
            .await
            .unwrap()
            .expect("student should exist");

        assert_eq!(updated.student.name, "Ada L.");
        assert_eq!(updated.student.roll_number, "R-001");
        assert_eq!(updated.marks.len(), 1);
        assert_eq!(updated.marks[0].subject, "Chemistry");

        // 未提供 marks 时保留原成绩
        let renamed = storage
            .update_student_impl(
                id,
                UpdateStudentRequest {
                    roll_number: Some("R-009".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.student.roll_number, "R-009");
        assert_eq!(renamed.marks.len(), 1);

        // 空数组清空成绩
        let cleared = storage
            .update_student_impl(
                id,
                UpdateStudentRequest {
                    marks: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(cleared.marks.is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_student() {
        let storage = storage().await;
        let result = storage
            .update_student_impl(404, UpdateStudentRequest::default())
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_marks() {
        let storage = storage().await;
        let first = storage
            .create_student_impl(new_student("Ada", "R-001", vec![mark("Math", 90.0, None)]))
            .await
            .unwrap();
        storage
            .create_student_impl(new_student("Bo", "R-002", vec![]))
            .await
            .unwrap();

        // 学号冲突导致整个更新回滚
        let err = storage
            .update_student_impl(
                first.student.id,
                UpdateStudentRequest {
                    roll_number: Some("R-002".to_string()),
                    marks: Some(vec![]),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(err.is_conflict());

        let unchanged = storage
            .get_student_by_id_impl(first.student.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(unchanged.student.roll_number, "R-001");
        assert_eq!(unchanged.marks.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_and_reports_missing() {
        let storage = storage().await;
        let created = storage
            .create_student_impl(new_student("Ada", "R-001", vec![mark("Math", 90.0, None)]))
            .await
            .unwrap();
        let id = created.student.id;

        assert!(storage.delete_student_impl(id).await.unwrap());
        assert!(storage.get_student_by_id_impl(id).await.unwrap().is_none());
        assert!(!storage.delete_student_impl(id).await.unwrap());

        // 科目不随学生删除
        assert_eq!(storage.list_subjects_impl().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_load_marks_beyond_parameter_limit() {
        let storage = storage().await;
        let created = storage
            .create_student_impl(new_student("Ada", "R-001", vec![mark("Math", 90.0, None)]))
            .await
            .unwrap();

        // 远超 SQLite 单条语句的参数上限
        let mut ids: Vec<i64> = (100_000..140_000).collect();
        ids.push(created.student.id);

        let marks = load_marks(&storage.db, &ids).await.unwrap();
        assert_eq!(marks.len(), 1);
        assert_eq!(marks[&created.student.id][0].subject, "Math");
    }

    /// 基于临时文件的 SQLite 数据库，多连接池
    struct TempDatabase {
        path: std::path::PathBuf,
    }

    impl TempDatabase {
        fn new() -> Self {
            let path =
                std::env::temp_dir().join(format!("srms-test-{}.db", uuid::Uuid::new_v4()));
            Self { path }
        }

        async fn storage(&self, pool_size: u32) -> SeaOrmStorage {
            let config = crate::config::DatabaseConfig {
                url: self.path.display().to_string(),
                pool_size,
                timeout: 10,
            };
            let url = SeaOrmStorage::build_database_url(&config.url).unwrap();
            let db = SeaOrmStorage::connect_sqlite(&url, &config).await.unwrap();
            SeaOrmStorage::from_connection(db).await.unwrap()
        }
    }

    impl Drop for TempDatabase {
        fn drop(&mut self) {
            for suffix in ["", "-wal", "-shm"] {
                let mut file = self.path.clone().into_os_string();
                file.push(suffix);
                let _ = std::fs::remove_file(file);
            }
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_on_file_pool() {
        let db = TempDatabase::new();
        let storage = db.storage(8).await;

        let subjects = ["Math", "Physics", "Chemistry"];
        let mut ids = Vec::new();
        for i in 0..8 {
            let created = storage
                .create_student_impl(new_student(
                    &format!("Student {i}"),
                    &format!("R-{i:03}"),
                    subjects.iter().map(|s| mark(s, 50.0, None)).collect(),
                ))
                .await
                .unwrap();
            ids.push(created.student.id);
        }

        let mut writers = Vec::new();
        for round in 0..20 {
            for &id in &ids {
                let storage = storage.clone();
                writers.push(tokio::spawn(async move {
                    storage
                        .update_student_impl(
                            id,
                            UpdateStudentRequest {
                                name: Some(format!("Student {id} v{round}")),
                                roll_number: None,
                                marks: Some(
                                    subjects
                                        .iter()
                                        .map(|s| mark(s, round as f64, None))
                                        .collect(),
                                ),
                            },
                        )
                        .await
                }));
            }
        }

        // 成绩整体替换期间，读者只能看到完整的旧成绩或新成绩
        let mut readers = Vec::new();
        for i in 0..40 {
            let storage = storage.clone();
            let id = ids[i % ids.len()];
            readers.push(tokio::spawn(async move {
                storage
                    .get_student_by_id_impl(id)
                    .await
                    .map(|record| record.map(|r| r.marks.len()))
            }));
        }

        for writer in writers {
            let record = writer.await.unwrap().unwrap();
            assert!(record.is_some());
        }
        for reader in readers {
            assert_eq!(reader.await.unwrap().unwrap(), Some(subjects.len()));
        }

        let all = storage
            .list_students_impl(StudentListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.len(), ids.len());
        assert!(all.iter().all(|r| r.marks.len() == subjects.len()));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_create_and_delete_on_file_pool() {
        let db = TempDatabase::new();
        let storage = db.storage(8).await;

        let mut tasks = Vec::new();
        for i in 0..32 {
            let storage = storage.clone();
            tasks.push(tokio::spawn(async move {
                let created = storage
                    .create_student_impl(new_student(
                        "Temp",
                        &format!("T-{i}"),
                        vec![mark("Math", 10.0, None)],
                    ))
                    .await?;
                if i % 2 == 0 {
                    storage.delete_student_impl(created.student.id).await?;
                }
                Ok::<_, SrmsError>(())
            }));
        }

        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(storage.count_students_impl().await.unwrap(), 16);
    }
}
