//! 回答实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "answers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub question_id: i64,
    pub panelist_id: i64,
    #[sea_orm(column_type = "Text")]
    pub text: String,
    pub score: i32,
    pub favorite: i32,
    pub answered_date: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::questions::Entity",
        from = "Column::QuestionId",
        to = "super::questions::Column::Id"
    )]
    Question,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PanelistId",
        to = "super::users::Column::Id"
    )]
    Panelist,
}

impl Related<super::questions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Question.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Panelist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_answer(self) -> crate::models::answers::entities::Answer {
        use chrono::{DateTime, Utc};

        crate::models::answers::entities::Answer {
            id: self.id,
            question_id: self.question_id,
            panelist_id: self.panelist_id,
            text: self.text,
            score: self.score,
            favorite: self.favorite,
            answered_date: DateTime::<Utc>::from_timestamp(self.answered_date, 0)
                .unwrap_or_default(),
        }
    }
}
