use serde::Deserialize;
use ts_rs::TS;

/// 未指定或为 0 时使用的满分
pub const DEFAULT_MAX_MARKS: f64 = 100.0;

// 单科成绩输入
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct MarkInput {
    pub subject: String,
    pub marks_obtained: f64,
    #[ts(optional)]
    pub max_marks: Option<f64>,
}

impl MarkInput {
    /// 实际满分：缺省或为 0 时按 100 计
    pub fn resolved_max_marks(&self) -> f64 {
        match self.max_marks {
            Some(max) if max != 0.0 => max,
            _ => DEFAULT_MAX_MARKS,
        }
    }
}

// 学生创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub roll_number: String,
    #[serde(default)]
    pub marks: Vec<MarkInput>,
}

// 学生更新请求，marks 存在时整体替换原有成绩
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub name: Option<String>,
    pub roll_number: Option<String>,
    pub marks: Option<Vec<MarkInput>>,
}

// 学生列表查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListParams {
    pub search: Option<String>,
}

// 学生列表查询参数（用于存储层）
#[derive(Debug, Clone, Default)]
pub struct StudentListQuery {
    pub search: Option<String>,
}
