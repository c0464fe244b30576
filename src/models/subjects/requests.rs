use serde::Deserialize;
use ts_rs::TS;

// 科目创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct CreateSubjectRequest {
    #[serde(default)]
    pub name: String,
}
