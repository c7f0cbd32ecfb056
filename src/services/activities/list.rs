use std::collections::HashMap;

use crate::errors::{Result, VClassError};
use crate::models::{Outcome, activities::responses::StudentActivity};
use crate::services::{WorkflowService, respond};
use crate::utils::validate::require_field;

/// 全部活动按截止日期升序，附带该学生的提交状态与成绩
pub async fn list_activities_for_student(
    service: &WorkflowService,
    username: &str,
) -> Outcome<Vec<StudentActivity>> {
    let result = collect(service, username).await;
    respond("list_activities_for_student", result, |items| {
        let submitted = items.iter().filter(|item| item.submitted).count();
        format!("{} activities, {} submitted", items.len(), submitted)
    })
}

async fn collect(service: &WorkflowService, username: &str) -> Result<Vec<StudentActivity>> {
    let username = require_field(username, "username")?;
    let storage = service.storage();

    if storage.get_user_by_username(&username).await?.is_none() {
        return Err(VClassError::not_found(format!("User {username} not found")));
    }

    let mut submissions: HashMap<i64, _> = storage
        .list_submissions_by_student(&username)
        .await?
        .into_iter()
        .map(|s| (s.activity_id, s))
        .collect();

    let activities = storage.list_activities().await?;

    Ok(activities
        .into_iter()
        .map(|activity| {
            let submission = submissions.remove(&activity.id);
            StudentActivity::new(activity, submission)
        })
        .collect())
}
