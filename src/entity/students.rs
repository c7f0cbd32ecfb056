//! 学生档案实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub username: String,
    #[sea_orm(unique)]
    pub enrollment_id: String,
    pub name: String,
    pub birth_date: Option<Date>,
    pub national_id: String,
    pub program: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub address: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub progress_percent: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::Username",
        to = "super::users::Column::Username"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_student(self) -> crate::models::students::entities::StudentProfile {
        crate::models::students::entities::StudentProfile {
            username: self.username,
            enrollment_id: self.enrollment_id,
            name: self.name,
            birth_date: self.birth_date,
            national_id: self.national_id,
            program: self.program,
            email: self.email,
            phone: self.phone,
            address: self.address,
            progress_percent: self.progress_percent,
        }
    }
}
