use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::QuestionService;
use crate::models::{
    ApiResponse, ErrorCode,
    questions::{requests::CreateQuestionRequest, responses::QuestionResponse},
};

pub async fn create_question(
    service: &QuestionService,
    questioner_id: i64,
    question_data: CreateQuestionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = question_data.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::QuestionTextInvalid,
            e.message(),
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_question(questioner_id, question_data).await {
        Ok(question) => Ok(HttpResponse::Created().json(ApiResponse::success(
            QuestionResponse { question },
            "题目创建成功",
        ))),
        Err(e) => {
            let msg = format!("Question creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::QuestionCreationFailed,
                msg,
            )))
        }
    }
}
