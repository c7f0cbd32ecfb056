use std::collections::HashMap;
use std::sync::Arc;

use crate::config::DatabaseConfig;
use crate::models::{
    activities::{entities::Activity, requests::NewActivity},
    students::{entities::StudentProfile, requests::CreateStudentRequest},
    submissions::{
        entities::Submission,
        responses::{StudentSubmissionRecord, SubmissionReceipt},
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;
    // 列出待审批用户（按注册时间）
    async fn list_unapproved_users(&self) -> Result<Vec<User>>;
    // 批准用户，已批准时保持原审批人；用户不存在返回 None
    async fn approve_user(&self, username: &str, approved_by: &str) -> Result<Option<User>>;
    // 在同一事务中删除用户、学生档案及其提交
    async fn delete_user(&self, username: &str) -> Result<bool>;

    /// 学生档案方法
    // 在同一事务中创建用户与学生档案
    async fn create_student(
        &self,
        user: CreateUserRequest,
        profile: CreateStudentRequest,
    ) -> Result<StudentProfile>;
    // 通过用户名获取学生档案
    async fn get_student_by_username(&self, username: &str) -> Result<Option<StudentProfile>>;
    // 通过学号获取学生档案
    async fn get_student_by_enrollment_id(
        &self,
        enrollment_id: &str,
    ) -> Result<Option<StudentProfile>>;
    // 按审批状态列出学生档案（按姓名排序）
    async fn list_students(&self, approved: bool) -> Result<Vec<StudentProfile>>;

    /// 活动管理方法
    // 创建活动
    async fn create_activity(&self, activity: NewActivity) -> Result<Activity>;
    // 通过ID获取活动
    async fn get_activity_by_id(&self, activity_id: i64) -> Result<Option<Activity>>;
    // 通过标题查找活动（可能有多个）
    async fn find_activities_by_title(&self, title: &str) -> Result<Vec<Activity>>;
    // 列出全部活动（按截止日期升序）
    async fn list_activities(&self) -> Result<Vec<Activity>>;
    // 统计活动数量
    async fn count_activities(&self) -> Result<u64>;

    /// 提交管理方法
    // 列出某学生的全部提交
    async fn list_submissions_by_student(&self, username: &str) -> Result<Vec<Submission>>;
    // 学生提交历史（附带活动标题与截止日期，按截止日期升序）
    async fn list_student_submission_records(
        &self,
        username: &str,
    ) -> Result<Vec<StudentSubmissionRecord>>;
    // 在同一事务中写入提交并重算学生进度
    async fn record_submission(
        &self,
        activity_id: i64,
        username: &str,
        file_path: &str,
    ) -> Result<SubmissionReceipt>;
    // 写入成绩与评语，返回受影响行数
    async fn grade_submission(
        &self,
        activity_id: i64,
        username: &str,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<u64>;
    // 每个学生的提交数量
    async fn count_submissions_by_student(&self) -> Result<HashMap<String, u64>>;
}

pub async fn create_storage(config: &DatabaseConfig) -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::connect(config).await?;
    Ok(Arc::new(storage))
}
