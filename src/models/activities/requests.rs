use serde::Deserialize;

// 活动创建请求（来自表现层，截止日期为原始输入）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivityRequest {
    pub title: String,
    pub description: Option<String>,
    pub deadline: String,
    pub created_by: String,
}

// 活动创建请求（用于存储层）
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub title: String,
    pub description: Option<String>,
    pub deadline: chrono::NaiveDate,
    pub created_by: String,
}
