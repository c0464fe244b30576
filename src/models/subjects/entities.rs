use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 科目实体
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    pub name: String,
}
