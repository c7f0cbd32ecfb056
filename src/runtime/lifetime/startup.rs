use crate::archive::FileArchive;
use crate::config::{AdminConfig, AppConfig, Argon2Config};
use crate::errors::Result;
use crate::models::users::entities::UserRole;
use crate::models::users::requests::CreateUserRequest;
use crate::services::WorkflowService;
use crate::storage::{Storage, create_storage};
use crate::utils::password::{generate_random_password, hash_password};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 预置管理员的审批人
const SYSTEM_APPROVER: &str = "system";

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub service: WorkflowService,
}

/// 初始化默认管理员账号
/// 如果配置的管理员用户名不存在，则创建一个已批准的管理员
async fn seed_admin(storage: &Arc<dyn Storage>, admin: &AdminConfig, params: &Argon2Config) {
    // 检查管理员是否已存在
    match storage.get_user_by_username(&admin.username).await {
        Ok(Some(_)) => {
            debug!("Admin account {} already exists, skipping seed", admin.username);
            return;
        }
        Ok(None) => {
            info!("Admin account {} not found, creating it...", admin.username);
        }
        Err(e) => {
            warn!("Failed to look up admin account: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从配置，否则生成随机密码
    let password = if admin.password.is_empty() {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    } else {
        admin.password.clone()
    };

    let password_hash = match hash_password(&password, params) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin_request = CreateUserRequest {
        username: admin.username.clone(),
        password_hash,
        role: UserRole::Admin,
        approved: true,
        approved_by: Some(SYSTEM_APPROVER.to_string()),
    };

    match storage.create_user(admin_request).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (username: {})",
                user.username
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备启动上下文：存储、归档目录、默认管理员与工作流服务
pub async fn prepare_startup(config: &AppConfig) -> Result<StartupContext> {
    let storage = create_storage(&config.database).await?;
    warn!("Storage backend initialized and migrations completed");

    let archive = FileArchive::new(&config.archive.dir);
    archive.ensure_root()?;
    debug!("Submission archive at {}", archive.root().display());

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage, &config.admin, &config.argon2).await;

    let service = WorkflowService::new(storage.clone(), archive, config.argon2.clone());

    Ok(StartupContext { storage, service })
}
