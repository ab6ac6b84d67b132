use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::QuestionService;
use crate::models::{ApiResponse, ErrorCode, questions::responses::QuestionResponse};

/// 出题
/// POST /questions/{id}/ask
///
/// 盖章出题时刻并置位 was_asked；重复出题仅重新盖章。
pub async fn ask_question(
    service: &QuestionService,
    question_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.ask_question(question_id).await {
        Ok(Some(question)) => {
            tracing::info!("Question {} asked at {}", question.id, question.asked_date);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                QuestionResponse { question },
                "出题成功",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::QuestionNotFound,
            "题目不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::QuestionAskFailed,
                format!("出题失败: {e}"),
            )),
        ),
    }
}
