use crate::errors::{Result, VClassError};
use crate::models::{Outcome, students::entities::StudentProfile};
use crate::services::{WorkflowService, respond};
use crate::utils::validate::require_field;

pub async fn list_approved_students(service: &WorkflowService) -> Outcome<Vec<StudentProfile>> {
    let result = service.storage().list_students(true).await;
    respond("list_approved_students", result, |students| {
        format!("{} approved student(s)", students.len())
    })
}

pub async fn get_student_profile(service: &WorkflowService, username: &str) -> Outcome<StudentProfile> {
    let result = find_profile(service, username).await;
    respond("get_student_profile", result, |profile| {
        format!("Profile of {}", profile.name)
    })
}

async fn find_profile(service: &WorkflowService, username: &str) -> Result<StudentProfile> {
    let username = require_field(username, "username")?;
    service
        .storage()
        .get_student_by_username(&username)
        .await?
        .ok_or_else(|| VClassError::not_found(format!("Student profile for {username} not found")))
}

#[cfg(test)]
mod tests {
    use crate::models::ErrorCode;
    use crate::test_utils::{approved_student, setup_workflow, student_request};

    #[tokio::test]
    async fn test_approved_students_sorted_by_name() {
        let ctx = setup_workflow().await;
        approved_student(&ctx, "010", "Zeca").await;
        approved_student(&ctx, "011", "Bia").await;
        ctx.service
            .register_student(student_request("012", "Ana"))
            .await;

        let students = ctx.service.list_approved_students().await.into_data().unwrap();

        let names: Vec<_> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Bia", "Zeca"]);
    }

    #[tokio::test]
    async fn test_get_student_profile() {
        let ctx = setup_workflow().await;
        let ana = approved_student(&ctx, "001", "Ana").await;

        let found = ctx.service.get_student_profile("aluno_001").await;
        assert_eq!(found.into_data(), Some(ana));

        let missing = ctx.service.get_student_profile("aluno_404").await;
        assert_eq!(missing.code, ErrorCode::NotFound);
    }
}
