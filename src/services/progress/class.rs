use crate::errors::Result;
use crate::models::{Outcome, progress::responses::ClassProgressEntry};
use crate::services::{WorkflowService, respond};

/// 全班进度：已批准学生按姓名排序，附带提交数量与活动总数
pub async fn class_progress(service: &WorkflowService) -> Outcome<Vec<ClassProgressEntry>> {
    let result = collect(service).await;
    respond("class_progress", result, |entries| {
        format!("Progress for {} student(s)", entries.len())
    })
}

async fn collect(service: &WorkflowService) -> Result<Vec<ClassProgressEntry>> {
    let storage = service.storage();
    let students = storage.list_students(true).await?;
    let counts = storage.count_submissions_by_student().await?;
    let total_activity_count = storage.count_activities().await?;

    Ok(students
        .into_iter()
        .map(|student| ClassProgressEntry {
            submission_count: counts.get(&student.username).copied().unwrap_or(0),
            name: student.name,
            enrollment_id: student.enrollment_id,
            progress_percent: student.progress_percent,
            total_activity_count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use crate::models::submissions::requests::SubmitActivityRequest;
    use crate::test_utils::{
        activity, approved_instructor, approved_student, setup_workflow, student_request,
    };

    #[tokio::test]
    async fn test_class_progress_only_approved_students() {
        let ctx = setup_workflow().await;
        approved_instructor(&ctx, "prof1").await;
        let bruno = approved_student(&ctx, "002", "Bruno").await;
        approved_student(&ctx, "001", "Ana").await;
        ctx.service
            .register_student(student_request("003", "Caio"))
            .await;
        let first = activity(&ctx, "A1", "2024-10-01", "prof1").await;
        activity(&ctx, "A2", "2024-10-08", "prof1").await;

        ctx.service
            .submit_activity(SubmitActivityRequest {
                activity_id: first.id,
                username: bruno.username.clone(),
                source_file: ctx.write_file("a1.txt", "x"),
            })
            .await;

        let entries = ctx.service.class_progress().await.into_data().unwrap();

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Ana", "Bruno"]);
        assert_eq!(entries[0].submission_count, 0);
        assert_eq!(entries[0].progress_percent, 0.0);
        assert_eq!(entries[1].enrollment_id, "002");
        assert_eq!(entries[1].submission_count, 1);
        assert_eq!(entries[1].progress_percent, 50.0);
        assert!(entries.iter().all(|e| e.total_activity_count == 2));
    }

    #[tokio::test]
    async fn test_class_progress_empty() {
        let ctx = setup_workflow().await;
        let outcome = ctx.service.class_progress().await;
        assert!(outcome.success);
        assert!(outcome.into_data().unwrap().is_empty());
    }
}
