use serde::Deserialize;
use std::path::PathBuf;

// 提交活动请求，源文件由调用方显式传入
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitActivityRequest {
    pub activity_id: i64,
    pub username: String,
    pub source_file: PathBuf,
}

// 按活动 ID 评分
#[derive(Debug, Clone, Deserialize)]
pub struct GradeSubmissionRequest {
    pub activity_id: i64,
    pub username: String,
    pub grade: f64,
    pub feedback: Option<String>,
}

// 按活动标题评分，标题必须唯一对应一个活动
#[derive(Debug, Clone, Deserialize)]
pub struct GradeByTitleRequest {
    pub activity_title: String,
    pub username: String,
    pub grade: f64,
    pub feedback: Option<String>,
}
