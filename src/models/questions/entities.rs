use serde::{Deserialize, Serialize};

/// 题目的采点人数配额：达到配额后题目进入「已采点」状态
pub const EVALUATOR_QUOTA: i32 = 15;

// 题目实体（お題）
//
// 生命周期：创建（未出题）→ 出题（was_asked）→ 采点完成（was_evaluated）。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub questioner_id: i64,
    pub text: String,
    pub evaluate_counter: i32,
    pub created_date: chrono::DateTime<chrono::Utc>,
    pub asked_date: chrono::DateTime<chrono::Utc>,
    pub was_asked: bool,
    pub was_evaluated: bool,
}
