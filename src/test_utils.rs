//! 测试辅助：临时目录中的 SQLite 数据库与提交归档

use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::{ConnectionTrait, Database};
use tempfile::TempDir;

use crate::archive::FileArchive;
use crate::config::{Argon2Config, DatabaseConfig};
use crate::models::activities::{entities::Activity, requests::CreateActivityRequest};
use crate::models::students::{entities::StudentProfile, requests::RegisterStudentRequest};
use crate::models::submissions::entities::Submission;
use crate::models::users::{
    entities::{User, UserRole},
    requests::RegisterUserRequest,
};
use crate::services::WorkflowService;
use crate::storage::sea_orm_storage::SeaOrmStorage;

const DB_FILE: &str = "vclass-test.db";

pub struct TestContext {
    pub service: WorkflowService,
    pub dir: TempDir,
}

impl TestContext {
    pub fn write_file(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join("uploads").join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, body).unwrap();
        path
    }

    pub fn archive_root(&self) -> PathBuf {
        self.dir.path().join("submissions")
    }

    /// 通过另一个连接安装触发器，让之后对 submissions 的写入全部失败
    pub async fn block_submission_writes(&self) {
        let url = format!("sqlite://{}?mode=rw", self.dir.path().join(DB_FILE).display());
        let db = Database::connect(url).await.expect("failed to open second connection");
        for event in ["INSERT", "UPDATE"] {
            db.execute_unprepared(&format!(
                "CREATE TRIGGER block_submission_{} BEFORE {event} ON submissions \
                 BEGIN SELECT RAISE(ABORT, 'submissions are locked'); END",
                event.to_lowercase()
            ))
            .await
            .expect("failed to install trigger");
        }
    }

    pub async fn submission_of(&self, activity_id: i64, username: &str) -> Option<Submission> {
        self.service
            .storage()
            .list_submissions_by_student(username)
            .await
            .unwrap()
            .into_iter()
            .find(|s| s.activity_id == activity_id)
    }
}

/// 测试用的低成本哈希参数
pub fn cheap_password_params() -> Argon2Config {
    Argon2Config {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    }
}

pub async fn setup_workflow() -> TestContext {
    let dir = TempDir::new().expect("failed to create tempdir");
    let config = DatabaseConfig {
        url: dir.path().join(DB_FILE).display().to_string(),
        pool_size: 1,
        timeout: 5,
    };
    let storage = SeaOrmStorage::connect(&config)
        .await
        .expect("failed to open test database");
    let archive = FileArchive::new(dir.path().join("submissions"));

    TestContext {
        service: WorkflowService::new(Arc::new(storage), archive, cheap_password_params()),
        dir,
    }
}

pub fn student_request(enrollment_id: &str, name: &str) -> RegisterStudentRequest {
    RegisterStudentRequest {
        enrollment_id: enrollment_id.to_string(),
        name: name.to_string(),
        national_id: format!("cpf-{enrollment_id}"),
        ..Default::default()
    }
}

pub async fn approved_instructor(ctx: &TestContext, username: &str) -> User {
    let outcome = ctx
        .service
        .register_user(RegisterUserRequest {
            username: username.to_string(),
            password: "secret".to_string(),
            role: UserRole::Instructor,
        })
        .await;
    assert!(outcome.success, "{}", outcome.message);
    let approved = ctx.service.approve_user(username, "admin").await;
    approved.into_data().expect("instructor approval failed")
}

pub async fn approved_student(ctx: &TestContext, enrollment_id: &str, name: &str) -> StudentProfile {
    let outcome = ctx
        .service
        .register_student(student_request(enrollment_id, name))
        .await;
    let profile = outcome.into_data().expect("student registration failed");
    let approved = ctx.service.approve_user(&profile.username, "admin").await;
    assert!(approved.success, "{}", approved.message);
    profile
}

pub async fn activity(ctx: &TestContext, title: &str, deadline: &str, created_by: &str) -> Activity {
    ctx.service
        .create_activity(CreateActivityRequest {
            title: title.to_string(),
            description: None,
            deadline: deadline.to_string(),
            created_by: created_by.to_string(),
        })
        .await
        .into_data()
        .expect("activity creation failed")
}
