use tracing::info;

use crate::errors::{Result, VClassError};
use crate::models::{
    Outcome,
    activities::{
        entities::Activity,
        requests::{CreateActivityRequest, NewActivity},
    },
    users::entities::UserRole,
};
use crate::services::{WorkflowService, respond};
use crate::utils::parse_date;
use crate::utils::validate::{optional_field, require_field};

pub async fn create_activity(service: &WorkflowService, req: CreateActivityRequest) -> Outcome<Activity> {
    let result = create(service, req).await;
    if let Ok(activity) = &result {
        info!(
            "Activity {} '{}' created by {}, due {}",
            activity.id, activity.title, activity.created_by, activity.deadline
        );
    }
    respond("create_activity", result, |activity| {
        format!("Activity '{}' created", activity.title)
    })
}

async fn create(service: &WorkflowService, req: CreateActivityRequest) -> Result<Activity> {
    let title = require_field(&req.title, "title")?;
    let deadline = parse_date(&require_field(&req.deadline, "deadline")?)?;
    let created_by = require_field(&req.created_by, "created_by")?;

    let storage = service.storage();
    let author = storage
        .get_user_by_username(&created_by)
        .await?
        .ok_or_else(|| VClassError::not_found(format!("User {created_by} not found")))?;

    if !UserRole::activity_author_roles().contains(&author.role) {
        return Err(VClassError::validation(format!(
            "User {created_by} is not allowed to create activities"
        )));
    }
    if !author.approved {
        return Err(VClassError::validation(format!(
            "User {created_by} is awaiting approval"
        )));
    }

    storage
        .create_activity(NewActivity {
            title,
            description: optional_field(req.description),
            deadline,
            created_by,
        })
        .await
}
