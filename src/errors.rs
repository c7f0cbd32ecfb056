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
macro_rules! define_vclass_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum VClassError {
            $($variant(String),)*
        }

        impl VClassError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(VClassError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(VClassError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(VClassError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl VClassError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        VClassError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_vclass_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    DuplicateKey("E004", "Duplicate Key"),
    Validation("E005", "Validation Error"),
    NotFound("E006", "Resource Not Found"),
    FileOperation("E007", "File Operation Error"),
    Authentication("E008", "Authentication Error"),
    PasswordHash("E009", "Password Hashing Error"),
}

impl VClassError {
    /// 将数据库错误归类：唯一约束冲突视为 DuplicateKey
    pub fn from_db(err: sea_orm::DbErr, context: &str) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                VClassError::DuplicateKey(format!("{context}: {detail}"))
            }
            _ => VClassError::DatabaseOperation(format!("{context}: {err}")),
        }
    }

    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for VClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for VClassError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for VClassError {
    fn from(err: sea_orm::DbErr) -> Self {
        VClassError::from_db(err, "数据库操作失败")
    }
}

impl From<std::io::Error> for VClassError {
    fn from(err: std::io::Error) -> Self {
        VClassError::FileOperation(err.to_string())
    }
}

impl From<chrono::ParseError> for VClassError {
    fn from(err: chrono::ParseError) -> Self {
        VClassError::Validation(format!("日期格式错误: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, VClassError>;
