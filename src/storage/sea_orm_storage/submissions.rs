//! 提交存储操作

use std::collections::{HashMap, HashSet};

use super::SeaOrmStorage;
use crate::entity::prelude::{Activities, Students, SubmissionActiveModel, Submissions};
use crate::entity::students::Column as StudentColumn;
use crate::entity::submissions::Column;
use crate::errors::{Result, VClassError};
use crate::models::submissions::{
    entities::Submission,
    responses::{StudentSubmissionRecord, SubmissionReceipt},
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 列出学生的全部提交
    pub async fn list_submissions_by_student_impl(&self, username: &str) -> Result<Vec<Submission>> {
        let results = Submissions::find()
            .filter(Column::StudentUsername.eq(username))
            .order_by_asc(Column::ActivityId)
            .all(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询学生提交失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 学生提交历史，附带活动标题与截止日期
    pub async fn list_student_submission_records_impl(
        &self,
        username: &str,
    ) -> Result<Vec<StudentSubmissionRecord>> {
        let rows = Submissions::find()
            .filter(Column::StudentUsername.eq(username))
            .find_also_related(Activities)
            .all(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询提交历史失败: {e}")))?;

        let mut records: Vec<StudentSubmissionRecord> = rows
            .into_iter()
            .filter_map(|(submission, activity)| {
                let activity = activity?;
                let submission = submission.into_submission();
                Some(StudentSubmissionRecord {
                    activity_id: activity.id,
                    activity_title: activity.title,
                    deadline: activity.deadline,
                    submitted_at: submission.submitted_at,
                    file_path: submission.file_path,
                    grade: submission.grade,
                    feedback: submission.feedback,
                })
            })
            .collect();

        records.sort_by(|a, b| {
            a.deadline
                .cmp(&b.deadline)
                .then(a.activity_id.cmp(&b.activity_id))
        });

        Ok(records)
    }

    /// 写入提交并重算进度（同一事务）
    ///
    /// 已有提交时只更新提交时间与文件路径，成绩与评语保持不变。
    pub async fn record_submission_impl(
        &self,
        activity_id: i64,
        username: &str,
        file_path: &str,
    ) -> Result<SubmissionReceipt> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| VClassError::database_operation(format!("开启事务失败: {e}")))?;

        let existing = Submissions::find()
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::StudentUsername.eq(username))
            .one(&txn)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询提交失败: {e}")))?;

        let resubmitted = existing.is_some();

        let saved = match existing {
            Some(model) => {
                let mut active: SubmissionActiveModel = model.into();
                active.submitted_at = Set(now);
                active.file_path = Set(file_path.to_string());
                active
                    .update(&txn)
                    .await
                    .map_err(|e| VClassError::database_operation(format!("更新提交失败: {e}")))?
            }
            None => {
                let active = SubmissionActiveModel {
                    activity_id: Set(activity_id),
                    student_username: Set(username.to_string()),
                    submitted_at: Set(now),
                    file_path: Set(file_path.to_string()),
                    grade: Set(None),
                    feedback: Set(None),
                    ..Default::default()
                };
                active
                    .insert(&txn)
                    .await
                    .map_err(|e| VClassError::from_db(e, "创建提交失败"))?
            }
        };

        let progress_percent = recompute_progress(&txn, username).await?;

        txn.commit()
            .await
            .map_err(|e| VClassError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(SubmissionReceipt {
            submission: saved.into_submission(),
            resubmitted,
            progress_percent,
        })
    }

    /// 写入成绩与评语
    pub async fn grade_submission_impl(
        &self,
        activity_id: i64,
        username: &str,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<u64> {
        let result = Submissions::update_many()
            .col_expr(Column::Grade, Expr::value(grade))
            .col_expr(Column::Feedback, Expr::value(feedback))
            .filter(Column::ActivityId.eq(activity_id))
            .filter(Column::StudentUsername.eq(username))
            .exec(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("更新成绩失败: {e}")))?;

        Ok(result.rows_affected)
    }

    /// 每个学生的提交数量
    pub async fn count_submissions_by_student_impl(&self) -> Result<HashMap<String, u64>> {
        let rows = Submissions::find()
            .select_only()
            .column(Column::StudentUsername)
            .column_as(Column::Id.count(), "submission_count")
            .group_by(Column::StudentUsername)
            .into_tuple::<(String, i64)>()
            .all(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("统计提交数量失败: {e}")))?;

        Ok(rows
            .into_iter()
            .map(|(username, count)| (username, count.max(0) as u64))
            .collect())
    }
}

/// 进度 = 已提交的不同活动数 × 100 / 活动总数
///
/// 只在提交时重算；之后新增的活动不会让已存的进度下降。
async fn recompute_progress<C>(conn: &C, username: &str) -> Result<f64>
where
    C: ConnectionTrait,
{
    let activity_ids = Submissions::find()
        .select_only()
        .column(Column::ActivityId)
        .filter(Column::StudentUsername.eq(username))
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| VClassError::database_operation(format!("查询已提交活动失败: {e}")))?;

    let submitted = activity_ids.into_iter().collect::<HashSet<_>>().len();

    let total = Activities::find()
        .count(conn)
        .await
        .map_err(|e| VClassError::database_operation(format!("统计活动数量失败: {e}")))?;

    let progress_percent = progress_percent(submitted as u64, total);

    Students::update_many()
        .col_expr(StudentColumn::ProgressPercent, Expr::value(progress_percent))
        .filter(StudentColumn::Username.eq(username))
        .exec(conn)
        .await
        .map_err(|e| VClassError::database_operation(format!("更新学生进度失败: {e}")))?;

    Ok(progress_percent)
}

pub(crate) fn progress_percent(submitted: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    submitted as f64 * 100.0 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent() {
        assert_eq!(progress_percent(2, 4), 50.0);
        assert_eq!(progress_percent(1, 1), 100.0);
        assert_eq!(progress_percent(0, 3), 0.0);
        assert_eq!(progress_percent(0, 0), 0.0);
    }
}
