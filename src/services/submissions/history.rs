use crate::errors::{Result, VClassError};
use crate::models::{Outcome, submissions::responses::StudentSubmissionRecord};
use crate::services::{WorkflowService, respond};
use crate::utils::validate::require_field;

/// 学生的提交历史，按活动截止日期升序
pub async fn student_submissions(
    service: &WorkflowService,
    username: &str,
) -> Outcome<Vec<StudentSubmissionRecord>> {
    let result = history(service, username).await;
    respond("student_submissions", result, |records| {
        format!("{} submission(s)", records.len())
    })
}

async fn history(service: &WorkflowService, username: &str) -> Result<Vec<StudentSubmissionRecord>> {
    let username = require_field(username, "username")?;
    let storage = service.storage();

    if storage.get_student_by_username(&username).await?.is_none() {
        return Err(VClassError::not_found(format!(
            "Student profile for {username} not found"
        )));
    }

    storage.list_student_submission_records(&username).await
}
