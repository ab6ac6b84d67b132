use super::SeaOrmStorage;
use crate::entity::answers::{ActiveModel, Column, Entity as Answers};
use crate::errors::{OogiriBankError, Result};
use crate::models::{
    PaginationInfo,
    answers::{
        entities::Answer,
        requests::{AnswerListQuery, CreateAnswerRequest},
        responses::AnswerListResponse,
    },
};
use sea_orm::sea_query::{Expr, ExprTrait};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建回答（回答时刻取当前时钟）
    pub async fn create_answer_impl(
        &self,
        question_id: i64,
        panelist_id: i64,
        req: CreateAnswerRequest,
    ) -> Result<Answer> {
        let now = self.clock.timestamp();

        let model = ActiveModel {
            question_id: Set(question_id),
            panelist_id: Set(panelist_id),
            text: Set(req.text),
            score: Set(0),
            favorite: Set(0),
            answered_date: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("创建回答失败: {e}")))?;

        Ok(result.into_answer())
    }

    /// 通过 ID 获取回答
    pub async fn get_answer_by_id_impl(&self, id: i64) -> Result<Option<Answer>> {
        let result = Answers::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询回答失败: {e}")))?;

        Ok(result.map(|m| m.into_answer()))
    }

    /// 分页列出题目下的回答（得分高的在前）
    pub async fn list_question_answers_impl(
        &self,
        question_id: i64,
        query: AnswerListQuery,
    ) -> Result<AnswerListResponse> {
        let page = Ord::max(query.page.unwrap_or(1), 1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let select = Answers::find()
            .filter(Column::QuestionId.eq(question_id))
            .order_by_desc(Column::Score)
            .order_by_asc(Column::AnsweredDate);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询回答总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询回答页数失败: {e}")))?;

        let answers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询回答列表失败: {e}")))?;

        Ok(AnswerListResponse {
            items: answers.into_iter().map(|m| m.into_answer()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 采点
    ///
    /// score += point，单条 UPDATE 立即落库；允许负分，无上下限钳制。
    pub async fn evaluate_answer_impl(&self, id: i64, point: i32) -> Result<Option<Answer>> {
        let result = Answers::update_many()
            .col_expr(Column::Score, Expr::col(Column::Score).add(point))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("采点失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_answer_by_id_impl(id).await
    }

    /// 重新盖章回答时刻
    pub async fn mark_answered_impl(&self, id: i64) -> Result<Option<Answer>> {
        let now = self.clock.timestamp();

        let result = Answers::update_many()
            .col_expr(Column::AnsweredDate, Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("更新回答时刻失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_answer_by_id_impl(id).await
    }

    /// 删除回答
    pub async fn delete_answer_impl(&self, id: i64) -> Result<bool> {
        let result = Answers::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("删除回答失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{fixed_clock, storage_with_clock, user_request};
    use crate::models::answers::requests::{AnswerListQuery, CreateAnswerRequest};
    use crate::models::questions::requests::CreateQuestionRequest;

    async fn setup(
        storage: &super::SeaOrmStorage,
    ) -> (i64, i64) {
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();
        let question = storage
            .create_question_impl(
                user.id,
                CreateQuestionRequest {
                    text: "こんな学校は嫌だ".to_string(),
                },
            )
            .await
            .unwrap();
        (question.id, user.id)
    }

    fn answer(text: &str) -> CreateAnswerRequest {
        CreateAnswerRequest {
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_answer_defaults() {
        let storage = storage_with_clock(fixed_clock()).await;
        let (question_id, panelist_id) = setup(&storage).await;

        let created = storage
            .create_answer_impl(question_id, panelist_id, answer("校歌がラップ"))
            .await
            .unwrap();

        assert_eq!(created.score, 0);
        assert_eq!(created.favorite, 0);
        assert_eq!(created.answered_date.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_evaluate_accumulates_points() {
        let storage = storage_with_clock(fixed_clock()).await;
        let (question_id, panelist_id) = setup(&storage).await;
        let created = storage
            .create_answer_impl(question_id, panelist_id, answer("校歌がラップ"))
            .await
            .unwrap();

        let after_plus = storage
            .evaluate_answer_impl(created.id, 5)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after_plus.score, 5);

        // 负分直接扣减
        let after_minus = storage
            .evaluate_answer_impl(created.id, -2)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(after_minus.score, 3);
    }

    #[tokio::test]
    async fn test_evaluate_missing_answer_returns_none() {
        let storage = storage_with_clock(fixed_clock()).await;
        assert!(storage.evaluate_answer_impl(9999, 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mark_answered_restamps() {
        let clock = fixed_clock();
        let storage = storage_with_clock(clock.clone()).await;
        let (question_id, panelist_id) = setup(&storage).await;
        let created = storage
            .create_answer_impl(question_id, panelist_id, answer("校歌がラップ"))
            .await
            .unwrap();

        clock.advance(chrono::Duration::seconds(90));
        let marked = storage
            .mark_answered_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(marked.answered_date.timestamp(), 1_700_000_090);
    }

    #[tokio::test]
    async fn test_delete_question_cascades_answers() {
        let storage = storage_with_clock(fixed_clock()).await;
        let (question_id, panelist_id) = setup(&storage).await;
        let created = storage
            .create_answer_impl(question_id, panelist_id, answer("校歌がラップ"))
            .await
            .unwrap();

        assert!(storage.delete_question_impl(question_id).await.unwrap());
        assert!(
            storage
                .get_answer_by_id_impl(created.id)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_delete_user_blocked_by_answer() {
        let storage = storage_with_clock(fixed_clock()).await;
        let questioner = storage.create_user_impl(user_request("shinsuke_1")).await.unwrap();
        let panelist = storage.create_user_impl(user_request("panelist_1")).await.unwrap();
        let question = storage
            .create_question_impl(
                questioner.id,
                CreateQuestionRequest {
                    text: "こんな学校は嫌だ".to_string(),
                },
            )
            .await
            .unwrap();
        storage
            .create_answer_impl(question.id, panelist.id, answer("校歌がラップ"))
            .await
            .unwrap();

        let err = storage.delete_user_impl(panelist.id).await.unwrap_err();
        assert_eq!(err.error_type(), "Protected Reference Error");
    }

    #[tokio::test]
    async fn test_list_answers_by_score() {
        let storage = storage_with_clock(fixed_clock()).await;
        let (question_id, panelist_id) = setup(&storage).await;
        let low = storage
            .create_answer_impl(question_id, panelist_id, answer("そこそこの回答"))
            .await
            .unwrap();
        let high = storage
            .create_answer_impl(question_id, panelist_id, answer("大爆笑の回答"))
            .await
            .unwrap();

        storage.evaluate_answer_impl(low.id, 1).await.unwrap();
        storage.evaluate_answer_impl(high.id, 10).await.unwrap();

        let listed = storage
            .list_question_answers_impl(
                question_id,
                AnswerListQuery {
                    page: Some(1),
                    size: Some(10),
                },
            )
            .await
            .unwrap();

        assert_eq!(listed.pagination.total, 2);
        assert_eq!(listed.items[0].id, high.id);
    }
}
