//! 工作流服务
//!
//! 表现层调用的全部操作。每个操作都返回 [`Outcome`]，失败不会向上传播。

pub mod activities;
pub mod auth;
pub mod progress;
pub mod submissions;
pub mod users;

use std::sync::Arc;

use tracing::{error, warn};

use crate::archive::FileArchive;
use crate::config::Argon2Config;
use crate::errors::{Result, VClassError};
use crate::models::{
    Outcome,
    activities::{requests::CreateActivityRequest, responses::StudentActivity},
    activities::entities::Activity,
    progress::responses::ClassProgressEntry,
    students::{entities::StudentProfile, requests::RegisterStudentRequest},
    submissions::{
        requests::{GradeByTitleRequest, GradeSubmissionRequest, SubmitActivityRequest},
        responses::{GradeResult, StudentSubmissionRecord, SubmissionReceipt},
    },
    users::{entities::User, requests::RegisterUserRequest},
};
use crate::storage::Storage;

pub struct WorkflowService {
    storage: Arc<dyn Storage>,
    archive: FileArchive,
    password_params: Argon2Config,
}

impl WorkflowService {
    pub fn new(storage: Arc<dyn Storage>, archive: FileArchive, password_params: Argon2Config) -> Self {
        Self {
            storage,
            archive,
            password_params,
        }
    }

    pub(crate) fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub(crate) fn archive(&self) -> &FileArchive {
        &self.archive
    }

    pub(crate) fn password_params(&self) -> &Argon2Config {
        &self.password_params
    }

    // 注册与审批

    /// 注册教师或学生账号（未批准）
    pub async fn register_user(&self, req: RegisterUserRequest) -> Outcome<User> {
        users::register::register_user(self, req).await
    }

    /// 注册学生：用户与档案同一事务创建，登录名由学号派生，初始密码为证件号
    pub async fn register_student(&self, req: RegisterStudentRequest) -> Outcome<StudentProfile> {
        users::register::register_student(self, req).await
    }

    /// 待审批的学生档案
    pub async fn list_pending_students(&self) -> Outcome<Vec<StudentProfile>> {
        users::list::list_pending_students(self).await
    }

    /// 全部待审批用户
    pub async fn list_pending_users(&self) -> Outcome<Vec<User>> {
        users::list::list_pending_users(self).await
    }

    /// 批准用户，重复批准不报错
    pub async fn approve_user(&self, username: &str, approved_by: &str) -> Outcome<User> {
        users::approve::approve_user(self, username, approved_by).await
    }

    /// 拒绝（删除）待审批用户，不可恢复
    pub async fn reject_user(&self, username: &str) -> Outcome<()> {
        users::reject::reject_user(self, username).await
    }

    /// 登录校验，未批准用户无法通过
    pub async fn authenticate(&self, username: &str, password: &str) -> Outcome<User> {
        auth::login::authenticate(self, username, password).await
    }

    // 活动

    pub async fn create_activity(&self, req: CreateActivityRequest) -> Outcome<Activity> {
        activities::create::create_activity(self, req).await
    }

    /// 全部活动及该学生的提交情况，按截止日期升序
    pub async fn list_activities_for_student(&self, username: &str) -> Outcome<Vec<StudentActivity>> {
        activities::list::list_activities_for_student(self, username).await
    }

    // 提交与评分

    pub async fn submit_activity(&self, req: SubmitActivityRequest) -> Outcome<SubmissionReceipt> {
        submissions::submit::submit_activity(self, req).await
    }

    pub async fn grade_submission(&self, req: GradeSubmissionRequest) -> Outcome<GradeResult> {
        submissions::grade::grade_submission(self, req).await
    }

    /// 按标题评分，标题重复时拒绝执行
    pub async fn grade_submission_by_title(&self, req: GradeByTitleRequest) -> Outcome<GradeResult> {
        submissions::grade::grade_submission_by_title(self, req).await
    }

    pub async fn student_submissions(&self, username: &str) -> Outcome<Vec<StudentSubmissionRecord>> {
        submissions::history::student_submissions(self, username).await
    }

    // 进度

    pub async fn class_progress(&self) -> Outcome<Vec<ClassProgressEntry>> {
        progress::class::class_progress(self).await
    }

    pub async fn list_approved_students(&self) -> Outcome<Vec<StudentProfile>> {
        progress::students::list_approved_students(self).await
    }

    pub async fn get_student_profile(&self, username: &str) -> Outcome<StudentProfile> {
        progress::students::get_student_profile(self, username).await
    }
}

/// 把业务结果转换为 Outcome，并按错误种类记录日志
pub(crate) fn respond<T>(
    operation: &str,
    result: Result<T>,
    message: impl FnOnce(&T) -> String,
) -> Outcome<T> {
    if let Err(e) = &result {
        match e {
            VClassError::DatabaseConfig(_)
            | VClassError::DatabaseConnection(_)
            | VClassError::DatabaseOperation(_)
            | VClassError::FileOperation(_)
            | VClassError::PasswordHash(_) => error!("{} failed: {}", operation, e),
            _ => warn!("{} rejected: {}", operation, e),
        }
    }
    Outcome::from_result(result, message)
}
