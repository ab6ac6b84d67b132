pub mod answered;
pub mod create;
pub mod delete;
pub mod evaluate;
pub mod get;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::answers::requests::{
    AnswerListParams, CreateAnswerRequest, EvaluateAnswerRequest,
};
use crate::storage::Storage;

pub struct AnswerService {
    storage: Option<Arc<dyn Storage>>,
}

impl AnswerService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 列出题目下的回答
    pub async fn list_question_answers(
        &self,
        question_id: i64,
        query: AnswerListParams,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_question_answers(self, question_id, query, request).await
    }

    // 创建回答
    pub async fn create_answer(
        &self,
        question_id: i64,
        panelist_id: i64,
        answer_data: CreateAnswerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_answer(self, question_id, panelist_id, answer_data, request).await
    }

    // 根据ID获取回答
    pub async fn get_answer(
        &self,
        answer_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        get::get_answer(self, answer_id, request).await
    }

    // 采点
    pub async fn evaluate_answer(
        &self,
        answer_id: i64,
        evaluate_data: EvaluateAnswerRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        evaluate::evaluate_answer(self, answer_id, evaluate_data, request).await
    }

    // 重新盖章回答时刻
    pub async fn mark_answered(
        &self,
        answer_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        answered::mark_answered(self, answer_id, request).await
    }

    // 删除回答
    pub async fn delete_answer(
        &self,
        answer_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_answer(self, answer_id, request).await
    }
}
