//! 学生档案存储操作

use super::SeaOrmStorage;
use super::users::insert_user;
use crate::entity::prelude::{StudentActiveModel, Students, Users};
use crate::entity::students::Column;
use crate::entity::users::Column as UserColumn;
use crate::errors::{Result, VClassError};
use crate::models::students::{entities::StudentProfile, requests::CreateStudentRequest};
use crate::models::users::requests::CreateUserRequest;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建学生（用户 + 档案，同一事务，要么都成功要么都失败）
    pub async fn create_student_impl(
        &self,
        user: CreateUserRequest,
        profile: CreateStudentRequest,
    ) -> Result<StudentProfile> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| VClassError::database_operation(format!("开启事务失败: {e}")))?;

        insert_user(&txn, user).await?;

        let model = StudentActiveModel {
            username: Set(profile.username),
            enrollment_id: Set(profile.enrollment_id),
            name: Set(profile.name),
            birth_date: Set(profile.birth_date),
            national_id: Set(profile.national_id),
            program: Set(profile.program),
            email: Set(profile.email),
            phone: Set(profile.phone),
            address: Set(profile.address),
            progress_percent: Set(0.0),
        };

        let result = model
            .insert(&txn)
            .await
            .map_err(|e| VClassError::from_db(e, "创建学生档案失败"))?;

        txn.commit()
            .await
            .map_err(|e| VClassError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_student())
    }

    /// 通过用户名获取学生档案
    pub async fn get_student_by_username_impl(
        &self,
        username: &str,
    ) -> Result<Option<StudentProfile>> {
        let result = Students::find_by_id(username.to_string())
            .one(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询学生档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过学号获取学生档案
    pub async fn get_student_by_enrollment_id_impl(
        &self,
        enrollment_id: &str,
    ) -> Result<Option<StudentProfile>> {
        let result = Students::find()
            .filter(Column::EnrollmentId.eq(enrollment_id))
            .one(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询学生档案失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 按审批状态列出学生档案
    pub async fn list_students_impl(&self, approved: bool) -> Result<Vec<StudentProfile>> {
        let results = Students::find()
            .inner_join(Users)
            .filter(UserColumn::IsApproved.eq(approved))
            .order_by_asc(Column::Name)
            .order_by_asc(Column::Username)
            .all(&self.db)
            .await
            .map_err(|e| VClassError::database_operation(format!("查询学生列表失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_student()).collect())
    }
}
