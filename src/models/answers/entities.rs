use serde::{Deserialize, Serialize};

// 回答实体
//
// score 累加采点分值，无上下限；favorite 为收藏计数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub question_id: i64,
    pub panelist_id: i64,
    pub text: String,
    pub score: i32,
    pub favorite: i32,
    pub answered_date: chrono::DateTime<chrono::Utc>,
}
