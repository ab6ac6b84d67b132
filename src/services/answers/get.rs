use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AnswerService;
use crate::models::{ApiResponse, ErrorCode, answers::responses::AnswerResponse};

pub async fn get_answer(
    service: &AnswerService,
    answer_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_answer_by_id(answer_id).await {
        Ok(Some(answer)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(AnswerResponse { answer }, "查询成功")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AnswerNotFound,
            "回答不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询回答失败: {e}"),
            )),
        ),
    }
}
