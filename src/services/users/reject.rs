use tracing::info;

use crate::errors::{Result, VClassError};
use crate::models::Outcome;
use crate::services::{WorkflowService, respond};
use crate::utils::validate::require_field;

/// 拒绝待审批用户：删除账号、学生档案及其提交，不可恢复
pub async fn reject_user(service: &WorkflowService, username: &str) -> Outcome<()> {
    let result = reject(service, username).await;
    if result.is_ok() {
        info!("User {} rejected and removed", username.trim());
    }
    respond("reject_user", result, |_| {
        format!("User {} rejected", username.trim())
    })
}

async fn reject(service: &WorkflowService, username: &str) -> Result<()> {
    let username = require_field(username, "username")?;
    let storage = service.storage();

    let user = storage
        .get_user_by_username(&username)
        .await?
        .ok_or_else(|| VClassError::not_found(format!("User {username} not found")))?;

    if user.approved {
        return Err(VClassError::validation(format!(
            "User {username} is already approved and cannot be rejected"
        )));
    }

    if !storage.delete_user(&username).await? {
        return Err(VClassError::not_found(format!("User {username} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::models::ErrorCode;
    use crate::test_utils::{approved_student, setup_workflow, student_request};

    #[tokio::test]
    async fn test_reject_removes_user_and_profile() {
        let ctx = setup_workflow().await;
        ctx.service
            .register_student(student_request("001", "Ana"))
            .await;

        let outcome = ctx.service.reject_user("aluno_001").await;
        assert!(outcome.success, "{}", outcome.message);

        let storage = ctx.service.storage();
        assert!(storage.get_user_by_username("aluno_001").await.unwrap().is_none());
        assert!(storage.get_student_by_username("aluno_001").await.unwrap().is_none());
        assert!(
            storage
                .get_student_by_enrollment_id("001")
                .await
                .unwrap()
                .is_none()
        );

        // 学号被释放，可以重新注册
        assert!(
            ctx.service
                .register_student(student_request("001", "Ana"))
                .await
                .success
        );
    }

    #[tokio::test]
    async fn test_reject_unknown_user() {
        let ctx = setup_workflow().await;
        let outcome = ctx.service.reject_user("ghost").await;
        assert_eq!(outcome.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_reject_approved_user_refused() {
        let ctx = setup_workflow().await;
        approved_student(&ctx, "001", "Ana").await;

        let outcome = ctx.service.reject_user("aluno_001").await;

        assert_eq!(outcome.code, ErrorCode::Validation);
        assert!(
            ctx.service
                .storage()
                .get_user_by_username("aluno_001")
                .await
                .unwrap()
                .is_some()
        );
    }
}
