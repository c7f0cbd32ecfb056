use serde::Serialize;

use super::entities::Submission;

// 提交结果：写入的记录与重算后的进度
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    pub submission: Submission,
    /// 为 true 表示覆盖了已有提交
    pub resubmitted: bool,
    pub progress_percent: f64,
}

// 学生提交历史中的一条记录
#[derive(Debug, Clone, Serialize)]
pub struct StudentSubmissionRecord {
    pub activity_id: i64,
    pub activity_title: String,
    pub deadline: chrono::NaiveDate,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub file_path: String,
    pub grade: Option<f64>,
    pub feedback: Option<String>,
}

// 评分结果
#[derive(Debug, Clone, Serialize)]
pub struct GradeResult {
    pub activity_id: i64,
    pub username: String,
    /// 受影响的提交行数，没有提交时为 0
    pub rows_affected: u64,
}
