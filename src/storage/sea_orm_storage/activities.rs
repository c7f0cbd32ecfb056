//! 活动存储操作

use super::SeaOrmStorage;
use crate::entity::activities::Column;
use crate::entity::prelude::{Activities, ActivityActiveModel};
use crate::errors::{Result, VClassError};
use crate::models::activities::{entities::Activity, requests::NewActivity};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建活动
    pub async fn create_activity_impl(&self, req: NewActivity) -> Result<Activity> {
        let now = chrono::Utc::now().timestamp();

        let model = ActivityActiveModel {
            title: Set(req.title),
            description: Set(req.description),
            deadline: Set(req.deadline),
            created_at: Set(now),
            created_by: Set(req.created_by),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| VClassError::from_db(e, "创建活动失败"))?;

        Ok(result.into_activity())
    }

    /// 通过 ID 获取活动
    pub async fn get_activity_by_id_impl(&self, activity_id: i64) -> Result<Option<Activity>> {
        let result = Activities::find_by_id(activity_id)
            .one(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_activity()))
    }

    /// 通过标题查找活动
    pub async fn find_activities_by_title_impl(&self, title: &str) -> Result<Vec<Activity>> {
        let results = Activities::find()
            .filter(Column::Title.eq(title))
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("按标题查询活动失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_activity()).collect())
    }

    /// 列出全部活动，截止日期相同时按创建顺序
    pub async fn list_activities_impl(&self) -> Result<Vec<Activity>> {
        let results = Activities::find()
            .order_by_asc(Column::Deadline)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_activity()).collect())
    }

    /// 统计活动数量
    pub async fn count_activities_impl(&self) -> Result<u64> {
        Activities::find()
            .count(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("统计活动数量失败: {e}")))
    }
}
