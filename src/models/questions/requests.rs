use serde::Deserialize;

use crate::errors::OogiriBankError;
use crate::models::common::PaginationQuery;
use crate::utils::validate::validate_question_text;

// 排序方向（按出题时刻）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

// 题目查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct QuestionListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub order: Option<SortOrder>,
    pub was_asked: Option<bool>,
}

// 题目创建请求（出题者取当前登录用户）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub text: String,
}

impl CreateQuestionRequest {
    pub fn validate(&self) -> Result<(), OogiriBankError> {
        validate_question_text(&self.text)
            .map_err(|msg| OogiriBankError::validation(format!("text: {msg}")))
    }
}

// 题目列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub order: Option<SortOrder>,
    pub was_asked: Option<bool>,
}

impl From<QuestionListParams> for QuestionListQuery {
    fn from(params: QuestionListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            order: params.order,
            was_asked: params.was_asked,
        }
    }
}
