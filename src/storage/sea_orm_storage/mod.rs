//! SeaORM 存储实现
//!
//! 本地 SQLite 数据库，连接时自动运行迁移。

mod activities;
mod students;
mod submissions;
mod users;

use crate::config::DatabaseConfig;
use crate::errors::{Result, VClassError};
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 按给定配置连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;
        let db = Self::connect_sqlite(&db_url, config).await?;

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| VClassError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 连接（WAL + pragma 优化，开启外键约束）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| VClassError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.pool_size.max(1))
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .connect_with(opt)
            .await
            .map_err(|e| VClassError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 从配置值构建 SQLite 连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else {
            Err(VClassError::database_config(format!(
                "无法识别的数据库地址: {url}. 支持: sqlite:// URL、:memory: 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
use crate::models::{
    activities::{entities::Activity, requests::NewActivity},
    students::{entities::StudentProfile, requests::CreateStudentRequest},
    submissions::{
        entities::Submission,
        responses::{StudentSubmissionRecord, SubmissionReceipt},
    },
    users::{entities::User, requests::CreateUserRequest},
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn list_unapproved_users(&self) -> Result<Vec<User>> {
        self.list_unapproved_users_impl().await
    }

    async fn approve_user(&self, username: &str, approved_by: &str) -> Result<Option<User>> {
        self.approve_user_impl(username, approved_by).await
    }

    async fn delete_user(&self, username: &str) -> Result<bool> {
        self.delete_user_impl(username).await
    }

    // 学生模块
    async fn create_student(
        &self,
        user: CreateUserRequest,
        profile: CreateStudentRequest,
    ) -> Result<StudentProfile> {
        self.create_student_impl(user, profile).await
    }

    async fn get_student_by_username(&self, username: &str) -> Result<Option<StudentProfile>> {
        self.get_student_by_username_impl(username).await
    }

    async fn get_student_by_enrollment_id(
        &self,
        enrollment_id: &str,
    ) -> Result<Option<StudentProfile>> {
        self.get_student_by_enrollment_id_impl(enrollment_id).await
    }

    async fn list_students(&self, approved: bool) -> Result<Vec<StudentProfile>> {
        self.list_students_impl(approved).await
    }

    // 活动模块
    async fn create_activity(&self, activity: NewActivity) -> Result<Activity> {
        self.create_activity_impl(activity).await
    }

    async fn get_activity_by_id(&self, activity_id: i64) -> Result<Option<Activity>> {
        self.get_activity_by_id_impl(activity_id).await
    }

    async fn find_activities_by_title(&self, title: &str) -> Result<Vec<Activity>> {
        self.find_activities_by_title_impl(title).await
    }

    async fn list_activities(&self) -> Result<Vec<Activity>> {
        self.list_activities_impl().await
    }

    async fn count_activities(&self) -> Result<u64> {
        self.count_activities_impl().await
    }

    // 提交模块
    async fn list_submissions_by_student(&self, username: &str) -> Result<Vec<Submission>> {
        self.list_submissions_by_student_impl(username).await
    }

    async fn list_student_submission_records(
        &self,
        username: &str,
    ) -> Result<Vec<StudentSubmissionRecord>> {
        self.list_student_submission_records_impl(username).await
    }

    async fn record_submission(
        &self,
        activity_id: i64,
        username: &str,
        file_path: &str,
    ) -> Result<SubmissionReceipt> {
        self.record_submission_impl(activity_id, username, file_path)
            .await
    }

    async fn grade_submission(
        &self,
        activity_id: i64,
        username: &str,
        grade: f64,
        feedback: Option<String>,
    ) -> Result<u64> {
        self.grade_submission_impl(activity_id, username, grade, feedback)
            .await
    }

    async fn count_submissions_by_student(&self) -> Result<HashMap<String, u64>> {
        self.count_submissions_by_student_impl().await
    }
}
