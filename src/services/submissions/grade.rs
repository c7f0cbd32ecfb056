use tracing::{info, warn};

use crate::errors::{Result, VClassError};
use crate::models::{
    Outcome,
    activities::entities::Activity,
    submissions::{
        entities::{MAX_GRADE, MIN_GRADE},
        requests::{GradeByTitleRequest, GradeSubmissionRequest},
        responses::GradeResult,
    },
};
use crate::services::{WorkflowService, respond};
use crate::utils::validate::{optional_field, require_field};

pub async fn grade_submission(service: &WorkflowService, req: GradeSubmissionRequest) -> Outcome<GradeResult> {
    let result = grade_by_id(service, req).await;
    finish("grade_submission", result)
}

/// 按活动标题评分，标题必须恰好对应一个活动
pub async fn grade_submission_by_title(
    service: &WorkflowService,
    req: GradeByTitleRequest,
) -> Outcome<GradeResult> {
    let result = grade_by_title(service, req).await;
    finish("grade_submission_by_title", result)
}

fn finish(operation: &str, result: Result<GradeResult>) -> Outcome<GradeResult> {
    match &result {
        Ok(graded) if graded.rows_affected == 0 => warn!(
            "No submission from {} for activity {}, nothing graded",
            graded.username, graded.activity_id
        ),
        Ok(graded) => info!(
            "Graded submission of {} for activity {}",
            graded.username, graded.activity_id
        ),
        Err(_) => {}
    }
    respond(operation, result, |graded| {
        if graded.rows_affected == 0 {
            format!("No submission from {} to grade", graded.username)
        } else {
            "Grade recorded".to_string()
        }
    })
}

fn validate_grade(grade: f64) -> Result<f64> {
    if !grade.is_finite() || !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(VClassError::validation(format!(
            "Grade must be between {MIN_GRADE} and {MAX_GRADE}, got {grade}"
        )));
    }
    Ok(grade)
}

async fn grade_by_id(service: &WorkflowService, req: GradeSubmissionRequest) -> Result<GradeResult> {
    let grade = validate_grade(req.grade)?;
    let username = require_field(&req.username, "username")?;

    let activity = service
        .storage()
        .get_activity_by_id(req.activity_id)
        .await?
        .ok_or_else(|| VClassError::not_found(format!("Activity {} not found", req.activity_id)))?;

    write_grade(service, &activity, username, grade, req.feedback).await
}

async fn grade_by_title(service: &WorkflowService, req: GradeByTitleRequest) -> Result<GradeResult> {
    let grade = validate_grade(req.grade)?;
    let title = require_field(&req.activity_title, "activity_title")?;
    let username = require_field(&req.username, "username")?;

    let mut matches = service.storage().find_activities_by_title(&title).await?;
    let activity = match matches.len() {
        0 => {
            return Err(VClassError::not_found(format!(
                "Activity '{title}' not found"
            )));
        }
        1 => matches.remove(0),
        n => {
            return Err(VClassError::validation(format!(
                "Activity title '{title}' matches {n} activities; grade by id instead"
            )));
        }
    };

    write_grade(service, &activity, username, grade, req.feedback).await
}

async fn write_grade(
    service: &WorkflowService,
    activity: &Activity,
    username: String,
    grade: f64,
    feedback: Option<String>,
) -> Result<GradeResult> {
    let rows_affected = service
        .storage()
        .grade_submission(activity.id, &username, grade, optional_field(feedback))
        .await?;

    Ok(GradeResult {
        activity_id: activity.id,
        username,
        rows_affected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ErrorCode;
    use crate::models::submissions::requests::SubmitActivityRequest;
    use crate::test_utils::{
        TestContext, activity, approved_instructor, approved_student, setup_workflow,
    };

    async fn submitted_essay(ctx: &TestContext) -> i64 {
        approved_instructor(ctx, "prof1").await;
        let student = approved_student(ctx, "001", "Ana").await;
        let essay = activity(ctx, "Essay 1", "2024-12-01", "prof1").await;
        let outcome = ctx
            .service
            .submit_activity(SubmitActivityRequest {
                activity_id: essay.id,
                username: student.username,
                source_file: ctx.write_file("essay.txt", "text"),
            })
            .await;
        assert!(outcome.success, "{}", outcome.message);
        essay.id
    }

    fn by_id(activity_id: i64, grade: f64) -> GradeSubmissionRequest {
        GradeSubmissionRequest {
            activity_id,
            username: "aluno_001".to_string(),
            grade,
            feedback: Some("Well argued".to_string()),
        }
    }

    #[tokio::test]
    async fn test_grade_round_trips() {
        let ctx = setup_workflow().await;
        let essay_id = submitted_essay(&ctx).await;

        let graded = ctx
            .service
            .grade_submission(by_id(essay_id, 7.5))
            .await
            .into_data()
            .unwrap();
        assert_eq!(graded.rows_affected, 1);

        let submission = ctx.submission_of(essay_id, "aluno_001").await.unwrap();
        assert_eq!(submission.grade, Some(7.5));
        assert_eq!(submission.feedback.as_deref(), Some("Well argued"));
    }

    #[tokio::test]
    async fn test_grade_out_of_range_rejected() {
        let ctx = setup_workflow().await;
        let essay_id = submitted_essay(&ctx).await;

        for grade in [11.0, -1.0, f64::NAN] {
            let outcome = ctx.service.grade_submission(by_id(essay_id, grade)).await;
            assert_eq!(outcome.code, ErrorCode::Validation);
        }
        for grade in [MIN_GRADE, MAX_GRADE] {
            assert!(ctx.service.grade_submission(by_id(essay_id, grade)).await.success);
        }
    }

    #[tokio::test]
    async fn test_grade_without_submission_affects_nothing() {
        let ctx = setup_workflow().await;
        let essay_id = submitted_essay(&ctx).await;
        approved_student(&ctx, "002", "Bruno").await;

        let mut req = by_id(essay_id, 8.0);
        req.username = "aluno_002".to_string();
        let outcome = ctx.service.grade_submission(req).await;

        assert!(outcome.success);
        assert_eq!(outcome.into_data().unwrap().rows_affected, 0);
        assert!(ctx.submission_of(essay_id, "aluno_002").await.is_none());
    }

    #[tokio::test]
    async fn test_grade_by_title() {
        let ctx = setup_workflow().await;
        let essay_id = submitted_essay(&ctx).await;

        let graded = ctx
            .service
            .grade_submission_by_title(GradeByTitleRequest {
                activity_title: "Essay 1".to_string(),
                username: "aluno_001".to_string(),
                grade: 9.0,
                feedback: None,
            })
            .await
            .into_data()
            .unwrap();

        assert_eq!(graded.activity_id, essay_id);
        assert_eq!(graded.rows_affected, 1);
    }

    #[tokio::test]
    async fn test_ambiguous_or_unknown_title() {
        let ctx = setup_workflow().await;
        submitted_essay(&ctx).await;
        activity(&ctx, "Essay 1", "2025-03-01", "prof1").await;

        let request = |title: &str| GradeByTitleRequest {
            activity_title: title.to_string(),
            username: "aluno_001".to_string(),
            grade: 9.0,
            feedback: None,
        };

        let ambiguous = ctx.service.grade_submission_by_title(request("Essay 1")).await;
        assert_eq!(ambiguous.code, ErrorCode::Validation);

        let unknown = ctx.service.grade_submission_by_title(request("Essay 9")).await;
        assert_eq!(unknown.code, ErrorCode::NotFound);
    }
}
