//! 预导入模块，方便使用

pub use super::marks::{ActiveModel as MarkActiveModel, Entity as Marks};
pub use super::students::{ActiveModel as StudentActiveModel, Entity as Students};
pub use super::subjects::Entity as Subjects;
