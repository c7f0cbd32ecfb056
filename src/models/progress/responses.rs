use serde::Serialize;

// 班级进度中的一行（仅已批准的学生）
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassProgressEntry {
    pub name: String,
    pub enrollment_id: String,
    pub progress_percent: f64,
    pub submission_count: u64,
    pub total_activity_count: u64,
}
