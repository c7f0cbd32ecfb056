use serde::{Deserialize, Serialize};

/// 成绩下限
pub const MIN_GRADE: f64 = 0.0;
/// 成绩上限
pub const MAX_GRADE: f64 = 10.0;

// 提交实体，每个 (活动, 学生) 至多一条
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Submission {
    pub id: i64,
    pub activity_id: i64,
    pub student_username: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub file_path: String,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
}
