use tracing::info;

use crate::errors::{Result, VClassError};
use crate::models::{
    Outcome,
    students::{
        entities::{StudentProfile, derive_student_username},
        requests::{CreateStudentRequest, RegisterStudentRequest},
    },
    users::{
        entities::{User, UserRole},
        requests::{CreateUserRequest, RegisterUserRequest},
    },
};
use crate::services::{WorkflowService, respond};
use crate::utils::parse_date;
use crate::utils::password::hash_password;
use crate::utils::validate::{
    optional_field, require_field, validate_email, validate_enrollment_id, validate_username,
};

pub async fn register_user(service: &WorkflowService, req: RegisterUserRequest) -> Outcome<User> {
    let result = create_pending_user(service, req).await;
    if let Ok(user) = &result {
        info!("User {} registered as {}, awaiting approval", user.username, user.role);
    }
    respond("register_user", result, |user| {
        format!("Registration of {} submitted for approval", user.username)
    })
}

async fn create_pending_user(service: &WorkflowService, req: RegisterUserRequest) -> Result<User> {
    let username = require_field(&req.username, "username")?;
    validate_username(&username).map_err(VClassError::validation)?;

    if req.password.is_empty() {
        return Err(VClassError::validation("Missing required field: password"));
    }

    if !UserRole::self_registration_roles().contains(&req.role) {
        return Err(VClassError::validation(format!(
            "Role {} cannot be self-registered",
            req.role
        )));
    }

    let storage = service.storage();
    if storage.get_user_by_username(&username).await?.is_some() {
        return Err(VClassError::duplicate_key(format!(
            "Username {username} is already taken"
        )));
    }

    let password_hash = hash_password(&req.password, service.password_params())?;

    storage
        .create_user(CreateUserRequest {
            username,
            password_hash,
            role: req.role,
            approved: false,
            approved_by: None,
        })
        .await
}

pub async fn register_student(
    service: &WorkflowService,
    req: RegisterStudentRequest,
) -> Outcome<StudentProfile> {
    let result = create_pending_student(service, req).await;
    if let Ok(profile) = &result {
        info!(
            "Student {} ({}) registered, awaiting approval",
            profile.username, profile.enrollment_id
        );
    }
    respond("register_student", result, |profile| {
        format!(
            "Student registered; login with username {} once approved",
            profile.username
        )
    })
}

async fn create_pending_student(
    service: &WorkflowService,
    req: RegisterStudentRequest,
) -> Result<StudentProfile> {
    let enrollment_id = require_field(&req.enrollment_id, "enrollment_id")?;
    validate_enrollment_id(&enrollment_id).map_err(VClassError::validation)?;
    let name = require_field(&req.name, "name")?;
    let national_id = require_field(&req.national_id, "national_id")?;

    let birth_date = optional_field(req.birth_date)
        .map(|raw| parse_date(&raw))
        .transpose()?;

    let email = optional_field(req.email);
    if let Some(email) = &email {
        validate_email(email).map_err(VClassError::validation)?;
    }

    let storage = service.storage();
    if storage
        .get_student_by_enrollment_id(&enrollment_id)
        .await?
        .is_some()
    {
        return Err(VClassError::duplicate_key(format!(
            "Enrollment id {enrollment_id} is already registered"
        )));
    }

    let username = derive_student_username(&enrollment_id);
    if storage.get_user_by_username(&username).await?.is_some() {
        return Err(VClassError::duplicate_key(format!(
            "Username {username} is already taken"
        )));
    }

    // 初始密码为证件号
    let password_hash = hash_password(&national_id, service.password_params())?;

    let user = CreateUserRequest {
        username: username.clone(),
        password_hash,
        role: UserRole::Student,
        approved: false,
        approved_by: None,
    };
    let profile = CreateStudentRequest {
        username,
        enrollment_id,
        name,
        birth_date,
        national_id,
        program: optional_field(req.program),
        email,
        phone: optional_field(req.phone),
        address: optional_field(req.address),
    };

    storage.create_student(user, profile).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorCode;
    use crate::test_utils::{setup_workflow, student_request};

    fn instructor(username: &str) -> RegisterUserRequest {
        RegisterUserRequest {
            username: username.to_string(),
            password: "secret".to_string(),
            role: UserRole::Instructor,
        }
    }

    #[tokio::test]
    async fn test_register_user_starts_unapproved() {
        let ctx = setup_workflow().await;

        let user = ctx
            .service
            .register_user(instructor("prof1"))
            .await
            .into_data()
            .unwrap();

        assert_eq!(user.role, UserRole::Instructor);
        assert!(!user.approved);
        assert!(user.approved_by.is_none());
        assert_ne!(user.password_hash, "secret");
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let ctx = setup_workflow().await;
        assert!(ctx.service.register_user(instructor("prof1")).await.success);

        let outcome = ctx.service.register_user(instructor("prof1")).await;

        assert!(!outcome.success);
        assert_eq!(outcome.code, ErrorCode::DuplicateKey);
    }

    #[tokio::test]
    async fn test_admin_role_cannot_self_register() {
        let ctx = setup_workflow().await;
        let mut req = instructor("root");
        req.role = UserRole::Admin;

        let outcome = ctx.service.register_user(req).await;

        assert_eq!(outcome.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_blank_fields_rejected() {
        let ctx = setup_workflow().await;

        let outcome = ctx.service.register_user(instructor("   ")).await;
        assert_eq!(outcome.code, ErrorCode::Validation);

        let mut req = instructor("prof2");
        req.password.clear();
        let outcome = ctx.service.register_user(req).await;
        assert_eq!(outcome.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_register_student_derives_username() {
        let ctx = setup_workflow().await;
        let mut req = student_request("123", "Ana");
        req.birth_date = Some("15/03/2004".to_string());
        req.email = Some("ana@example.com".to_string());

        let profile = ctx
            .service
            .register_student(req)
            .await
            .into_data()
            .unwrap();

        assert_eq!(profile.username, "aluno_123");
        assert_eq!(profile.progress_percent, 0.0);
        assert_eq!(
            profile.birth_date,
            chrono::NaiveDate::from_ymd_opt(2004, 3, 15)
        );

        let user = ctx
            .service
            .storage()
            .get_user_by_username("aluno_123")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.role, UserRole::Student);
        assert!(!user.approved);
    }

    #[tokio::test]
    async fn test_duplicate_enrollment_rejected() {
        let ctx = setup_workflow().await;
        assert!(
            ctx.service
                .register_student(student_request("123", "Ana"))
                .await
                .success
        );

        let outcome = ctx
            .service
            .register_student(student_request("123", "Bruno"))
            .await;

        assert!(!outcome.success);
        assert_eq!(outcome.code, ErrorCode::DuplicateKey);
        let profile = ctx.service.get_student_profile("aluno_123").await;
        assert_eq!(profile.into_data().unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn test_student_missing_fields_and_bad_date() {
        let ctx = setup_workflow().await;

        let outcome = ctx
            .service
            .register_student(student_request("124", " "))
            .await;
        assert_eq!(outcome.code, ErrorCode::Validation);

        let mut req = student_request("125", "Caio");
        req.national_id.clear();
        assert_eq!(
            ctx.service.register_student(req).await.code,
            ErrorCode::Validation
        );

        let mut req = student_request("126", "Dora");
        req.birth_date = Some("2004-13-40".to_string());
        assert_eq!(
            ctx.service.register_student(req).await.code,
            ErrorCode::Validation
        );

        // 校验失败不会留下半条记录
        assert!(
            ctx.service
                .storage()
                .get_user_by_username("aluno_126")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_student_login_uses_national_id() {
        let ctx = setup_workflow().await;
        let profile = ctx
            .service
            .register_student(student_request("777", "Eva"))
            .await
            .into_data()
            .unwrap();
        ctx.service.approve_user(&profile.username, "admin").await;

        let outcome = ctx
            .service
            .authenticate(&profile.username, "cpf-777")
            .await;

        assert!(outcome.success, "{}", outcome.message);
    }
}
