use serde::Serialize;

use super::entities::Activity;
use crate::models::submissions::entities::Submission;

// 学生视角的活动列表项：活动 + 该学生的提交（如有）
#[derive(Debug, Clone, Serialize)]
pub struct StudentActivity {
    pub activity: Activity,
    pub submitted: bool,
    pub submission: Option<Submission>,
}

impl StudentActivity {
    pub fn new(activity: Activity, submission: Option<Submission>) -> Self {
        Self {
            activity,
            submitted: submission.is_some(),
            submission,
        }
    }

    pub fn grade(&self) -> Option<f64> {
        self.submission.as_ref().and_then(|s| s.grade)
    }

    pub fn feedback(&self) -> Option<&str> {
        self.submission.as_ref().and_then(|s| s.feedback.as_deref())
    }
}
