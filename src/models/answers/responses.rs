use super::entities::Answer;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 回答响应
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: Answer,
}

// 回答列表响应
#[derive(Debug, Serialize)]
pub struct AnswerListResponse {
    pub items: Vec<Answer>,
    pub pagination: PaginationInfo,
}
