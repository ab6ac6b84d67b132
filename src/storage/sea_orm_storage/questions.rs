use super::SeaOrmStorage;
use crate::entity::questions::{ActiveModel, Column, Entity as Questions};
use crate::errors::{OogiriBankError, Result};
use crate::models::{
    PaginationInfo,
    questions::{
        entities::{EVALUATOR_QUOTA, Question},
        requests::{CreateQuestionRequest, QuestionListQuery, SortOrder},
        responses::QuestionListResponse,
    },
};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建题目（初始为未出题状态）
    pub async fn create_question_impl(
        &self,
        questioner_id: i64,
        req: CreateQuestionRequest,
    ) -> Result<Question> {
        let now = self.clock.timestamp();

        let model = ActiveModel {
            questioner_id: Set(questioner_id),
            text: Set(req.text),
            evaluate_counter: Set(0),
            created_date: Set(now),
            asked_date: Set(now),
            was_asked: Set(false),
            was_evaluated: Set(false),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("创建题目失败: {e}")))?;

        Ok(result.into_question())
    }

    /// 通过 ID 获取题目
    pub async fn get_question_by_id_impl(&self, id: i64) -> Result<Option<Question>> {
        let result = Questions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 按出题时刻分页列出题目
    pub async fn list_questions_with_pagination_impl(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Questions::find();

        // 出题状态筛选
        if let Some(was_asked) = query.was_asked {
            select = select.filter(Column::WasAsked.eq(was_asked));
        }

        // 排序（缺省按出题时刻倒序，最新在前）
        select = match query.order.unwrap_or(SortOrder::Desc) {
            SortOrder::Asc => select.order_by_asc(Column::AskedDate),
            SortOrder::Desc => select.order_by_desc(Column::AskedDate),
        };

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询题目总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询题目页数失败: {e}")))?;

        let questions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询题目列表失败: {e}")))?;

        Ok(QuestionListResponse {
            items: questions.into_iter().map(|m| m.into_question()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 出题
    ///
    /// 重新盖章出题时刻并置位 was_asked。重复调用只刷新时刻，无状态保护。
    pub async fn ask_question_impl(&self, id: i64) -> Result<Option<Question>> {
        let now = self.clock.timestamp();

        let result = Questions::update_many()
            .col_expr(Column::AskedDate, Expr::value(now))
            .col_expr(Column::WasAsked, Expr::value(true))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("出题失败: {e}")))?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get_question_by_id_impl(id).await
    }

    /// 记录一次采点
    ///
    /// 计数器加一；达到配额（15 人）后题目进入已采点状态，且不再回退。
    pub async fn record_evaluation_impl(&self, id: i64) -> Result<Option<Question>> {
        let Some(question) = self.get_question_by_id_impl(id).await? else {
            return Ok(None);
        };

        let counter = question.evaluate_counter + 1;
        let was_evaluated = question.was_evaluated || counter >= EVALUATOR_QUOTA;

        let model = ActiveModel {
            id: Set(id),
            evaluate_counter: Set(counter),
            was_evaluated: Set(was_evaluated),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("记录采点失败: {e}")))?;

        self.get_question_by_id_impl(id).await
    }

    /// 获取当前出题中的题目
    ///
    /// 最新出题且尚未采点完成的一条；没有时返回 None。
    pub async fn get_current_question_impl(&self) -> Result<Option<Question>> {
        let result = Questions::find()
            .filter(Column::WasAsked.eq(true))
            .filter(Column::WasEvaluated.eq(false))
            .order_by_desc(Column::AskedDate)
            .one(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询当前题目失败: {e}")))?;

        Ok(result.map(|m| m.into_question()))
    }

    /// 删除题目（回答级联删除）
    pub async fn delete_question_impl(&self, id: i64) -> Result<bool> {
        let result = Questions::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("删除题目失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{fixed_clock, storage_with_clock, user_request};
    use crate::models::questions::entities::EVALUATOR_QUOTA;
    use crate::models::questions::requests::{
        CreateQuestionRequest, QuestionListQuery, SortOrder,
    };

    fn question(text: &str) -> CreateQuestionRequest {
        CreateQuestionRequest {
            text: text.to_string(),
        }
    }

    fn list_query(order: SortOrder) -> QuestionListQuery {
        QuestionListQuery {
            page: Some(1),
            size: Some(10),
            order: Some(order),
            was_asked: None,
        }
    }

    #[tokio::test]
    async fn test_created_question_is_unasked() {
        let storage = storage_with_clock(fixed_clock()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();

        let created = storage
            .create_question_impl(user.id, question("こんな学校は嫌だ"))
            .await
            .unwrap();

        assert!(!created.was_asked);
        assert!(!created.was_evaluated);
        assert_eq!(created.evaluate_counter, 0);
        assert_eq!(created.created_date.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_ask_stamps_and_flips() {
        let clock = fixed_clock();
        let storage = storage_with_clock(clock.clone()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();
        let created = storage
            .create_question_impl(user.id, question("こんな学校は嫌だ"))
            .await
            .unwrap();
        let first_stamp = created.asked_date;

        clock.advance(chrono::Duration::seconds(120));
        let asked = storage.ask_question_impl(created.id).await.unwrap().unwrap();

        assert!(asked.was_asked);
        assert!(asked.asked_date >= first_stamp);
        assert_eq!(asked.asked_date.timestamp(), 1_700_000_120);

        // 重复出题只重新盖章
        clock.advance(chrono::Duration::seconds(60));
        let re_asked = storage.ask_question_impl(created.id).await.unwrap().unwrap();
        assert!(re_asked.was_asked);
        assert_eq!(re_asked.asked_date.timestamp(), 1_700_000_180);
    }

    #[tokio::test]
    async fn test_ask_missing_question_returns_none() {
        let storage = storage_with_clock(fixed_clock()).await;
        assert!(storage.ask_question_impl(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_evaluation_quota_flips_state() {
        let storage = storage_with_clock(fixed_clock()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();
        let created = storage
            .create_question_impl(user.id, question("こんな学校は嫌だ"))
            .await
            .unwrap();
        storage.ask_question_impl(created.id).await.unwrap();

        for round in 1..EVALUATOR_QUOTA {
            let q = storage
                .record_evaluation_impl(created.id)
                .await
                .unwrap()
                .unwrap();
            assert_eq!(q.evaluate_counter, round);
            assert!(!q.was_evaluated);
        }

        // 第 15 次采点后进入已采点状态
        let q = storage
            .record_evaluation_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(q.evaluate_counter, EVALUATOR_QUOTA);
        assert!(q.was_evaluated);

        // 状态不回退
        let q = storage
            .record_evaluation_impl(created.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(q.evaluate_counter, EVALUATOR_QUOTA + 1);
        assert!(q.was_evaluated);
    }

    #[tokio::test]
    async fn test_current_question_prefers_latest_open() {
        let clock = fixed_clock();
        let storage = storage_with_clock(clock.clone()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();

        let old = storage
            .create_question_impl(user.id, question("先週のお題"))
            .await
            .unwrap();
        storage.ask_question_impl(old.id).await.unwrap();

        clock.advance(chrono::Duration::seconds(3600));
        let newer = storage
            .create_question_impl(user.id, question("今週のお題"))
            .await
            .unwrap();
        storage.ask_question_impl(newer.id).await.unwrap();

        // 未出题的不参与
        storage
            .create_question_impl(user.id, question("下書きのお題"))
            .await
            .unwrap();

        let current = storage.get_current_question_impl().await.unwrap().unwrap();
        assert_eq!(current.id, newer.id);

        // 采点完成后退位给次新的题目
        for _ in 0..EVALUATOR_QUOTA {
            storage.record_evaluation_impl(newer.id).await.unwrap();
        }
        let current = storage.get_current_question_impl().await.unwrap().unwrap();
        assert_eq!(current.id, old.id);
    }

    #[tokio::test]
    async fn test_list_questions_order() {
        let clock = fixed_clock();
        let storage = storage_with_clock(clock.clone()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();

        let first = storage
            .create_question_impl(user.id, question("一問目"))
            .await
            .unwrap();
        storage.ask_question_impl(first.id).await.unwrap();

        clock.advance(chrono::Duration::seconds(60));
        let second = storage
            .create_question_impl(user.id, question("二問目"))
            .await
            .unwrap();
        storage.ask_question_impl(second.id).await.unwrap();

        let ascending = storage
            .list_questions_with_pagination_impl(list_query(SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(ascending.items[0].id, first.id);

        let descending = storage
            .list_questions_with_pagination_impl(list_query(SortOrder::Desc))
            .await
            .unwrap();
        assert_eq!(descending.items[0].id, second.id);
    }
}
