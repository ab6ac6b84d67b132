//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub rate: i32,
    pub short_match: i32,
    pub long_match: i32,
    pub short_win: i32,
    pub long_win: i32,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub last_login: Option<i64>,
    pub date_joined: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::department_users::Entity")]
    DepartmentUsers,
    #[sea_orm(has_many = "super::questions::Entity")]
    Questions,
    #[sea_orm(has_many = "super::answers::Entity")]
    Answers,
}

impl Related<super::department_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DepartmentUsers.def()
    }
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl Related<super::answers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use chrono::{DateTime, Utc};

        crate::models::users::entities::User {
            id: self.id,
            username: self.username,
            display_name: self.display_name,
            email: self.email,
            password_hash: self.password_hash,
            rate: self.rate,
            short_match: self.short_match,
            long_match: self.long_match,
            short_win: self.short_win,
            long_win: self.long_win,
            is_active: self.is_active,
            is_staff: self.is_staff,
            is_superuser: self.is_superuser,
            last_login: self
                .last_login
                .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
            date_joined: DateTime::<Utc>::from_timestamp(self.date_joined, 0).unwrap_or_default(),
        }
    }
}
