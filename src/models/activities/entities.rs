use serde::{Deserialize, Serialize};

// 活动实体，创建后不可修改
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub deadline: chrono::NaiveDate,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub created_by: String,
}
