use serde::{Deserialize, Serialize};

/// 学生注册时由学号派生登录名的前缀
pub const STUDENT_USERNAME_PREFIX: &str = "aluno_";

/// 由学号派生学生登录名
pub fn derive_student_username(enrollment_id: &str) -> String {
    format!("{STUDENT_USERNAME_PREFIX}{enrollment_id}")
}

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudentProfile {
    pub username: String,
    pub enrollment_id: String,
    pub name: String,
    pub birth_date: Option<chrono::NaiveDate>,
    pub national_id: String,
    pub program: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// 最近一次提交时计算的完成百分比，新增活动不会触发重算
    pub progress_percent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_derived_from_enrollment_id() {
        assert_eq!(derive_student_username("123"), "aluno_123");
    }
}
