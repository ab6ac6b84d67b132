//! 题目实体（お題）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub questioner_id: i64,
    pub text: String,
    pub evaluate_counter: i32,
    pub created_date: i64,
    pub asked_date: i64,
    pub was_asked: bool,
    pub was_evaluated: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::QuestionerId",
        to = "super::users::Column::Id"
    )]
    Questioner,
    #[sea_orm(has_many = "super::answers::Entity")]
    Answers,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questioner.def()
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
    pub fn into_question(self) -> crate::models::questions::entities::Question {
        use chrono::{DateTime, Utc};

        crate::models::questions::entities::Question {
            id: self.id,
            questioner_id: self.questioner_id,
            text: self.text,
            evaluate_counter: self.evaluate_counter,
            created_date: DateTime::<Utc>::from_timestamp(self.created_date, 0).unwrap_or_default(),
            asked_date: DateTime::<Utc>::from_timestamp(self.asked_date, 0).unwrap_or_default(),
            was_asked: self.was_asked,
            was_evaluated: self.was_evaluated,
        }
    }
}
