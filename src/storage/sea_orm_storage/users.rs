//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{Students, Submissions, UserActiveModel, Users};
use crate::entity::{students, submissions, users::Column};
use crate::errors::{Result, VClassError};
use crate::models::users::{entities::User, requests::CreateUserRequest};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建用户
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        insert_user(&self.db, req).await
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find_by_id(username.to_string())
            .one(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("统计用户数量失败: {e}")))
    }

    /// 列出待审批用户
    pub async fn list_unapproved_users_impl(&self) -> Result<Vec<User>> {
        let results = Users::find()
            .filter(Column::IsApproved.eq(false))
            .order_by_asc(Column::RegisteredAt)
            .order_by_asc(Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询待审批用户失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_user()).collect())
    }

    /// 批准用户（单向状态转换）
    pub async fn approve_user_impl(
        &self,
        username: &str,
        approved_by: &str,
    ) -> Result<Option<User>> {
        let existing = Users::find_by_id(username.to_string())
            .one(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询用户失败: {e}")))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        // 已批准时不改动审批人
        if model.is_approved {
            return Ok(Some(model.into_user()));
        }

        let mut active: UserActiveModel = model.into();
        active.is_approved = Set(true);
        active.approved_by = Set(Some(approved_by.to_string()));

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("批准用户失败: {e}")))?;

        Ok(Some(updated.into_user()))
    }

    /// 删除用户，连同学生档案与提交记录
    pub async fn delete_user_impl(&self, username: &str) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| VClassError::database_operation(format!("开启事务失败: {e}")))?;

        Submissions::delete_many()
            .filter(submissions::Column::StudentUsername.eq(username))
            .exec(&txn)
            .await
            .map_err(|e| VClassError::database_operation(format!("删除用户提交失败: {e}")))?;

        Students::delete_many()
            .filter(students::Column::Username.eq(username))
            .exec(&txn)
            .await
            .map_err(|e| VClassError::database_operation(format!("删除学生档案失败: {e}")))?;

        let result = Users::delete_by_id(username.to_string())
            .exec(&txn)
            .await
            .map_err(|e| VClassError::database_operation(format!("删除用户失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| VClassError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

/// 插入用户，可在事务中复用
pub(super) async fn insert_user<C>(conn: &C, req: CreateUserRequest) -> Result<User>
where
    C: ConnectionTrait,
{
    let now = chrono::Utc::now().timestamp();

    let model = UserActiveModel {
        username: Set(req.username),
        password_hash: Set(req.password_hash),
        role: Set(req.role.to_string()),
        is_approved: Set(req.approved),
        approved_by: Set(req.approved_by),
        registered_at: Set(now),
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| VClassError::from_db(e, "创建用户失败"))?;

    Ok(result.into_user())
}
