use super::entities::UserRole;
use serde::Deserialize;

// 用户注册请求（来自表现层）
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
    pub role: UserRole,
}

// 用户创建请求（用于存储层，密码已哈希）
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub approved: bool,
    pub approved_by: Option<String>,
}
