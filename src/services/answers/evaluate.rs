use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnswerService;
use crate::models::{
    ApiResponse, ErrorCode,
    answers::{requests::EvaluateAnswerRequest, responses::AnswerResponse},
};

/// 采点
/// POST /answers/{id}/evaluate
///
/// score += point 立即落库，随后在所属题目上记录一次采点；
/// 题目达到配额后进入已采点状态。无按人去重，连点会重复计分。
pub async fn evaluate_answer(
    service: &AnswerService,
    answer_id: i64,
    evaluate_data: EvaluateAnswerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.evaluate_answer(answer_id, evaluate_data.point).await {
        Ok(Some(answer)) => {
            // 在所属题目上记录一次采点
            match storage.record_evaluation(answer.question_id).await {
                Ok(Some(question)) if question.was_evaluated => {
                    tracing::info!(
                        "Question {} reached its evaluator quota ({} evaluations)",
                        question.id,
                        question.evaluate_counter
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        "Failed to record evaluation on question {}: {}",
                        answer.question_id,
                        e
                    );
                }
            }

            Ok(HttpResponse::Ok().json(ApiResponse::success(AnswerResponse { answer }, "采点成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AnswerNotFound,
            "回答不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::AnswerEvaluateFailed,
                format!("采点失败: {e}"),
            )),
        ),
    }
}
