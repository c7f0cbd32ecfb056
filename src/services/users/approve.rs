use tracing::info;

use crate::errors::{Result, VClassError};
use crate::models::{Outcome, users::entities::User};
use crate::services::{WorkflowService, respond};
use crate::utils::validate::require_field;

/// 批准用户。已批准的用户保持原审批人，操作仍视为成功
pub async fn approve_user(service: &WorkflowService, username: &str, approved_by: &str) -> Outcome<User> {
    let result = approve(service, username, approved_by).await;
    if let Ok(user) = &result {
        info!(
            "User {} approved by {}",
            user.username,
            user.approved_by.as_deref().unwrap_or("-")
        );
    }
    respond("approve_user", result, |user| {
        format!("User {} approved", user.username)
    })
}

async fn approve(service: &WorkflowService, username: &str, approved_by: &str) -> Result<User> {
    let username = require_field(username, "username")?;
    let approved_by = require_field(approved_by, "approved_by")?;

    service
        .storage()
        .approve_user(&username, &approved_by)
        .await?
        .ok_or_else(|| VClassError::not_found(format!("User {username} not found")))
}

#[cfg(test)]
mod tests {
    use crate::models::ErrorCode;
    use crate::test_utils::{setup_workflow, student_request};

    #[tokio::test]
    async fn test_approve_records_approver() {
        let ctx = setup_workflow().await;
        ctx.service
            .register_student(student_request("001", "Ana"))
            .await;

        let user = ctx
            .service
            .approve_user("aluno_001", "admin")
            .await
            .into_data()
            .unwrap();

        assert!(user.approved);
        assert_eq!(user.approved_by.as_deref(), Some("admin"));
        assert!(
            ctx.service
                .list_pending_students()
                .await
                .into_data()
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_approve_twice_keeps_first_approver() {
        let ctx = setup_workflow().await;
        ctx.service
            .register_student(student_request("001", "Ana"))
            .await;
        ctx.service.approve_user("aluno_001", "admin").await;

        let outcome = ctx.service.approve_user("aluno_001", "other").await;

        assert!(outcome.success);
        assert_eq!(
            outcome.into_data().unwrap().approved_by.as_deref(),
            Some("admin")
        );
    }

    #[tokio::test]
    async fn test_approve_unknown_user() {
        let ctx = setup_workflow().await;
        let outcome = ctx.service.approve_user("ghost", "admin").await;
        assert!(!outcome.success);
        assert_eq!(outcome.code, ErrorCode::NotFound);
    }
}
