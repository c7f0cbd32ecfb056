use tracing::{debug, info};

use crate::errors::{Result, VClassError};
use crate::models::{Outcome, users::entities::User};
use crate::services::{WorkflowService, respond};
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "Invalid credentials or account awaiting approval";

/// 校验用户名与密码，只有已批准的用户可以登录
pub async fn authenticate(service: &WorkflowService, username: &str, password: &str) -> Outcome<User> {
    let result = check_credentials(service, username, password).await;
    if let Ok(user) = &result {
        info!("User {} logged in successfully", user.username);
    }
    respond("authenticate", result, |user| {
        format!("Welcome, {}", user.username)
    })
}

async fn check_credentials(service: &WorkflowService, username: &str, password: &str) -> Result<User> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(VClassError::authentication(INVALID_CREDENTIALS));
    }

    // 1. 查找用户
    let Some(user) = service.storage().get_user_by_username(username).await? else {
        debug!("Login attempt for unknown user {}", username);
        return Err(VClassError::authentication(INVALID_CREDENTIALS));
    };

    // 2. 验证密码
    if !verify_password(password, &user.password_hash) {
        debug!("Wrong password for {}", username);
        return Err(VClassError::authentication(INVALID_CREDENTIALS));
    }

    // 3. 审批状态，失败提示与前两步相同
    if !user.approved {
        debug!("User {} is awaiting approval", username);
        return Err(VClassError::authentication(INVALID_CREDENTIALS));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use crate::models::ErrorCode;
    use crate::models::users::{entities::UserRole, requests::RegisterUserRequest};
    use crate::test_utils::{approved_instructor, setup_workflow};

    #[tokio::test]
    async fn test_unapproved_user_cannot_log_in() {
        let ctx = setup_workflow().await;
        ctx.service
            .register_user(RegisterUserRequest {
                username: "prof1".to_string(),
                password: "secret".to_string(),
                role: UserRole::Instructor,
            })
            .await;

        let outcome = ctx.service.authenticate("prof1", "secret").await;

        assert!(!outcome.success);
        assert_eq!(outcome.code, ErrorCode::Authentication);
        assert_eq!(outcome.message, super::INVALID_CREDENTIALS);
    }

    #[tokio::test]
    async fn test_approved_user_logs_in() {
        let ctx = setup_workflow().await;
        approved_instructor(&ctx, "prof1").await;

        let outcome = ctx.service.authenticate("prof1", "secret").await;

        assert!(outcome.success, "{}", outcome.message);
        assert_eq!(outcome.into_data().unwrap().role, UserRole::Instructor);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user() {
        let ctx = setup_workflow().await;
        approved_instructor(&ctx, "prof1").await;

        let wrong = ctx.service.authenticate("prof1", "guess").await;
        let unknown = ctx.service.authenticate("nobody", "secret").await;

        assert_eq!(wrong.code, ErrorCode::Authentication);
        assert_eq!(wrong.message, unknown.message);
    }
}
