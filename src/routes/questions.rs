use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireJWT};
use crate::models::answers::requests::{AnswerListParams, CreateAnswerRequest};
use crate::models::questions::requests::{CreateQuestionRequest, QuestionListParams};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{AnswerService, QuestionService};
use crate::utils::SafeIDI64;

// 懒加载的全局服务实例
static QUESTION_SERVICE: Lazy<QuestionService> = Lazy::new(QuestionService::new_lazy);
static ANSWER_SERVICE: Lazy<AnswerService> = Lazy::new(AnswerService::new_lazy);

// 列出题目（?order=asc|desc 按出题时刻排序）
pub async fn list_questions(
    req: HttpRequest,
    query: web::Query<QuestionListParams>,
) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE
        .list_questions(query.into_inner(), &req)
        .await
}

// 创建题目（出题者取当前登录用户）
pub async fn create_question(
    req: HttpRequest,
    body: web::Json<CreateQuestionRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    QUESTION_SERVICE
        .create_question(user_id, body.into_inner(), &req)
        .await
}

// 获取当前出题中的题目
pub async fn get_current_question(req: HttpRequest) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.get_current_question(&req).await
}

// 获取题目详情
pub async fn get_question(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.get_question(path.0, &req).await
}

// 出题
pub async fn ask_question(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.ask_question(path.0, &req).await
}

// 删除题目
pub async fn delete_question(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    QUESTION_SERVICE.delete_question(path.0, &req).await
}

// 列出题目下的回答
pub async fn list_question_answers(
    req: HttpRequest,
    path: SafeIDI64,
    query: web::Query<AnswerListParams>,
) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE
        .list_question_answers(path.0, query.into_inner(), &req)
        .await
}

// 创建回答（回答者取当前登录用户）
pub async fn create_answer(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CreateAnswerRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match RequireJWT::extract_user_id(&req) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "无法获取用户信息",
            )));
        }
    };

    ANSWER_SERVICE
        .create_answer(path.0, user_id, body.into_inner(), &req)
        .await
}

// 配置路由
pub fn configure_questions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/questions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出题目 - 所有登录用户可访问
                    .route(web::get().to(list_questions))
                    // 创建题目 - 所有登录用户可访问
                    .route(web::post().to(create_question)),
            )
            // 当前出题中的题目 - 所有登录用户可访问
            .service(web::resource("/current").route(web::get().to(get_current_question)))
            .service(
                web::resource("/{id}")
                    // 获取题目详情 - 所有登录用户可访问
                    .route(web::get().to(get_question))
                    // 删除题目 - 仅 staff
                    .route(
                        web::delete()
                            .to(delete_question)
                            .wrap(middlewares::RequireFlag::staff()),
                    ),
            )
            .service(
                // 出题 - 仅 staff
                web::resource("/{id}/ask").route(
                    web::post()
                        .to(ask_question)
                        .wrap(middlewares::RequireFlag::staff()),
                ),
            )
            .service(
                web::resource("/{id}/answers")
                    // 列出回答 - 所有登录用户可访问
                    .route(web::get().to(list_question_answers))
                    // 创建回答 - 所有登录用户可访问
                    .route(web::post().to(create_answer)),
            ),
    );
}
