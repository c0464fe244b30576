use super::entities::{Grade, Mark, StudentRecord};
use crate::utils::grade::summarize;
use serde::Serialize;
use ts_rs::TS;

// 学生成绩响应（含派生的总分、百分比与等级）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentResultResponse {
    pub id: i64,
    pub name: String,
    pub roll_number: String,
    pub marks: Vec<Mark>,
    pub total_obtained: f64,
    pub total_max: f64,
    pub percentage: f64,
    pub grade: Grade,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<StudentRecord> for StudentResultResponse {
    fn from(record: StudentRecord) -> Self {
        let summary = summarize(&record.marks);
        let student = record.student;

        Self {
            id: student.id,
            name: student.name,
            roll_number: student.roll_number,
            marks: record.marks,
            total_obtained: summary.total_obtained,
            total_max: summary.total_max,
            percentage: summary.percentage,
            grade: summary.grade,
            created_at: student.created_at,
            updated_at: student.updated_at,
        }
    }
}
