use serde::Deserialize;

// 学生注册请求（来自表现层，日期为原始输入）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegisterStudentRequest {
    pub enrollment_id: String,
    pub name: String,
    pub birth_date: Option<String>,
    pub national_id: String,
    pub program: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

// 学生档案创建请求（用于存储层，已校验）
#[derive(Debug, Clone)]
pub struct CreateStudentRequest {
    pub username: String,
    pub enrollment_id: String,
    pub name: String,
    pub birth_date: Option<chrono::NaiveDate>,
    pub national_id: String,
    pub program: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
