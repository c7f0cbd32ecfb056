use tracing::info;

use crate::errors::{Result, VClassError};
use crate::models::{
    Outcome,
    submissions::{requests::SubmitActivityRequest, responses::SubmissionReceipt},
};
use crate::services::{WorkflowService, respond};
use crate::utils::validate::require_field;

/// 提交活动：暂存文件，写入（或覆盖）提交并重算进度，成功后文件才生效
pub async fn submit_activity(
    service: &WorkflowService,
    req: SubmitActivityRequest,
) -> Outcome<SubmissionReceipt> {
    let result = submit(service, req).await;
    if let Ok(receipt) = &result {
        info!(
            "Student {} submitted activity {} ({}), progress {:.1}%",
            receipt.submission.student_username,
            receipt.submission.activity_id,
            if receipt.resubmitted { "resubmission" } else { "first submission" },
            receipt.progress_percent
        );
    }
    respond("submit_activity", result, |receipt| {
        if receipt.resubmitted {
            "Submission replaced".to_string()
        } else {
            "Submission received".to_string()
        }
    })
}

async fn submit(service: &WorkflowService, req: SubmitActivityRequest) -> Result<SubmissionReceipt> {
    let username = require_field(&req.username, "username")?;
    let storage = service.storage();

    // 复制文件之前先确认活动与学生都存在
    let activity = storage
        .get_activity_by_id(req.activity_id)
        .await?
        .ok_or_else(|| VClassError::not_found(format!("Activity {} not found", req.activity_id)))?;

    if storage.get_student_by_username(&username).await?.is_none() {
        return Err(VClassError::not_found(format!(
            "Student profile for {username} not found"
        )));
    }

    // 先写临时文件，记录提交成功后才替换归档中的文件
    let archive = service.archive();
    let staged = archive.stage(activity.id, &username, &req.source_file)?;
    let file_path = staged.destination().to_string_lossy().into_owned();

    match storage
        .record_submission(activity.id, &username, &file_path)
        .await
    {
        Ok(receipt) => {
            archive.commit(staged)?;
            Ok(receipt)
        }
        Err(e) => {
            archive.abandon(staged);
            Err(e)
        }
    }
}
