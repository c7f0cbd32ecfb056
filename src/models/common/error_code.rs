use serde::{Deserialize, Serialize};

use crate::errors::VClassError;

/// 返回给表现层的结果代码
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 输入类
    Validation = 1000,
    DuplicateKey = 1001,
    NotFound = 1002,
    Authentication = 1003,

    // 系统类
    FileOperation = 2000,
    Database = 2001,
    Internal = 2002,
}

impl From<&VClassError> for ErrorCode {
    fn from(err: &VClassError) -> Self {
        match err {
            VClassError::Validation(_) => ErrorCode::Validation,
            VClassError::DuplicateKey(_) => ErrorCode::DuplicateKey,
            VClassError::NotFound(_) => ErrorCode::NotFound,
            VClassError::Authentication(_) => ErrorCode::Authentication,
            VClassError::FileOperation(_) => ErrorCode::FileOperation,
            VClassError::PasswordHash(_) => ErrorCode::Internal,
            VClassError::DatabaseConfig(_)
            | VClassError::DatabaseConnection(_)
            | VClassError::DatabaseOperation(_) => ErrorCode::Database,
        }
    }
}
