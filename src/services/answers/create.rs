use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::AnswerService;
use crate::models::{
    ApiResponse, ErrorCode,
    answers::{requests::CreateAnswerRequest, responses::AnswerResponse},
};

/// 创建回答
/// POST /questions/{id}/answers
pub async fn create_answer(
    service: &AnswerService,
    question_id: i64,
    panelist_id: i64,
    answer_data: CreateAnswerRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = answer_data.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AnswerTextInvalid,
            e.message(),
        )));
    }

    let storage = service.get_storage(request);

    // 题目必须存在
    match storage.get_question_by_id(question_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::QuestionNotFound,
                "题目不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询题目失败: {e}"),
                )),
            );
        }
    }

    match storage
        .create_answer(question_id, panelist_id, answer_data)
        .await
    {
        Ok(answer) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(AnswerResponse { answer }, "回答创建成功"))),
        Err(e) => {
            let msg = format!("Answer creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::AnswerCreationFailed, msg)))
        }
    }
}
