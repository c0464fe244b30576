//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_srms_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SrmsError {
            $($variant(String),)*
        }

        impl SrmsError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SrmsError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SrmsError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SrmsError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl SrmsError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SrmsError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_srms_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Conflict("E004", "Resource Conflict"),
    Serialization("E005", "Serialization Error"),
}

impl SrmsError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 带上下文包装数据库错误，唯一约束冲突单独归类为 Conflict
    pub fn from_db(context: &str, err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                SrmsError::Conflict(format!("{context}: {detail}"))
            }
            _ => SrmsError::DatabaseOperation(format!("{context}: {err}")),
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, SrmsError::Conflict(_))
    }
}

impl fmt::Display for SrmsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SrmsError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for SrmsError {
    fn from(err: sea_orm::DbErr) -> Self {
        SrmsError::DatabaseOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SrmsError {
    fn from(err: serde_json::Error) -> Self {
        SrmsError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SrmsError>;
