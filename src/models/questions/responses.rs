use super::entities::Question;
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 题目响应
#[derive(Debug, Serialize)]
pub struct QuestionResponse {
    pub question: Question,
}

// 题目列表响应
#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub items: Vec<Question>,
    pub pagination: PaginationInfo,
}
