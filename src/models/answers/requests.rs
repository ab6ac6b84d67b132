use serde::Deserialize;

use crate::errors::OogiriBankError;
use crate::models::common::PaginationQuery;

// 回答查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct AnswerListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
}

// 回答创建请求（回答者取当前登录用户）
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnswerRequest {
    pub text: String,
}

impl CreateAnswerRequest {
    pub fn validate(&self) -> Result<(), OogiriBankError> {
        if self.text.trim().is_empty() {
            return Err(OogiriBankError::validation("text: Answer must be set"));
        }
        Ok(())
    }
}

// 采点请求：score += point，负分允许
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluateAnswerRequest {
    pub point: i32,
}

// 回答列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl From<AnswerListParams> for AnswerListQuery {
    fn from(params: AnswerListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
        }
    }
}
