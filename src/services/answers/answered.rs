use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnswerService;
use crate::models::{ApiResponse, ErrorCode, answers::responses::AnswerResponse};

/// 重新盖章回答时刻（标记回答定稿）
/// POST /answers/{id}/answered
pub async fn mark_answered(
    service: &AnswerService,
    answer_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.mark_answered(answer_id).await {
        Ok(Some(answer)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(AnswerResponse { answer }, "回答时刻已更新")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AnswerNotFound,
            "回答不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("更新回答时刻失败: {e}"),
            )),
        ),
    }
}
