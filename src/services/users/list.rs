use crate::models::{Outcome, students::entities::StudentProfile, users::entities::User};
use crate::services::{WorkflowService, respond};

pub async fn list_pending_students(service: &WorkflowService) -> Outcome<Vec<StudentProfile>> {
    let result = service.storage().list_students(false).await;
    respond("list_pending_students", result, |students| {
        format!("{} student(s) awaiting approval", students.len())
    })
}

pub async fn list_pending_users(service: &WorkflowService) -> Outcome<Vec<User>> {
    let result = service.storage().list_unapproved_users().await;
    respond("list_pending_users", result, |users| {
        format!("{} user(s) awaiting approval", users.len())
    })
}

#[cfg(test)]
mod tests {
    use crate::models::users::{entities::UserRole, requests::RegisterUserRequest};
    use crate::test_utils::{setup_workflow, student_request};

    #[tokio::test]
    async fn test_pending_lists_exclude_approved() {
        let ctx = setup_workflow().await;
        for (enrollment_id, name) in [("002", "Bruno"), ("001", "Ana"), ("003", "Caio")] {
            ctx.service
                .register_student(student_request(enrollment_id, name))
                .await;
        }
        ctx.service
            .register_user(RegisterUserRequest {
                username: "prof1".to_string(),
                password: "secret".to_string(),
                role: UserRole::Instructor,
            })
            .await;
        ctx.service.approve_user("aluno_003", "admin").await;

        let students = ctx.service.list_pending_students().await.into_data().unwrap();
        let names: Vec<_> = students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Ana", "Bruno"]);

        let users = ctx.service.list_pending_users().await.into_data().unwrap();
        let mut usernames: Vec<_> = users.iter().map(|u| u.username.as_str()).collect();
        usernames.sort();
        assert_eq!(usernames, ["aluno_001", "aluno_002", "prof1"]);
    }

    #[tokio::test]
    async fn test_pending_list_empty() {
        let ctx = setup_workflow().await;
        let outcome = ctx.service.list_pending_students().await;
        assert!(outcome.success);
        assert!(outcome.into_data().unwrap().is_empty());
    }
}
