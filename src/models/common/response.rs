use serde::Serialize;

use super::error_code::ErrorCode;
use crate::errors::VClassError;

/// 统一的操作结果
///
/// 工作流服务的所有失败都以 `(success, message)` 的形式交给调用方，
/// 不会作为 panic 或错误向上传播。`code` 区分失败种类，`data` 只在成功时存在。
#[derive(Debug, Clone, Serialize)]
pub struct Outcome<T> {
    pub success: bool,
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T> Outcome<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success,
            message: message.into(),
            data: Some(data),
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn failure(err: &VClassError) -> Self {
        Self {
            success: false,
            code: ErrorCode::from(err),
            message: err.message().to_string(),
            data: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// 根据业务结果构造，成功时由 `message` 生成提示文本
    pub fn from_result(
        result: crate::errors::Result<T>,
        message: impl FnOnce(&T) -> String,
    ) -> Self {
        match result {
            Ok(data) => {
                let text = message(&data);
                Self::success(data, text)
            }
            Err(e) => Self::failure(&e),
        }
    }

    /// 表现层使用的 (是否成功, 提示) 二元组
    pub fn as_pair(&self) -> (bool, &str) {
        (self.success, &self.message)
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T> From<Outcome<T>> for (bool, String) {
    fn from(outcome: Outcome<T>) -> Self {
        (outcome.success, outcome.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_carries_data() {
        let outcome = Outcome::success(7, "ok");
        assert!(outcome.success);
        assert_eq!(outcome.code, ErrorCode::Success);
        assert_eq!(outcome.into_data(), Some(7));
    }

    #[test]
    fn test_failure_keeps_error_kind_and_message() {
        let outcome: Outcome<()> = Outcome::failure(&VClassError::duplicate_key("user exists"));
        assert_eq!(outcome.as_pair(), (false, "user exists"));
        assert_eq!(outcome.code, ErrorCode::DuplicateKey);
        assert!(outcome.data.is_none());
    }

    #[test]
    fn test_from_result_builds_message_from_data() {
        let outcome = Outcome::from_result(Ok(3u64), |n| format!("{n} rows"));
        let pair: (bool, String) = outcome.into();
        assert_eq!(pair, (true, "3 rows".to_string()));
    }
}
