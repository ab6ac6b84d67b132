use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::answers::requests::EvaluateAnswerRequest;
use crate::services::AnswerService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AnswerService 实例
static ANSWER_SERVICE: Lazy<AnswerService> = Lazy::new(AnswerService::new_lazy);

// 获取回答详情
pub async fn get_answer(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE.get_answer(path.0, &req).await
}

// 采点
pub async fn evaluate_answer(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<EvaluateAnswerRequest>,
) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE
        .evaluate_answer(path.0, body.into_inner(), &req)
        .await
}

// 重新盖章回答时刻
pub async fn mark_answered(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE.mark_answered(path.0, &req).await
}

// 删除回答
pub async fn delete_answer(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ANSWER_SERVICE.delete_answer(path.0, &req).await
}

// 配置路由
pub fn configure_answers_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/answers")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/{id}")
                    // 获取回答详情 - 所有登录用户可访问
                    .route(web::get().to(get_answer))
                    // 删除回答 - 仅 staff
                    .route(
                        web::delete()
                            .to(delete_answer)
                            .wrap(middlewares::RequireFlag::staff()),
                    ),
            )
            // 采点 - 所有登录用户可访问（无按人去重，见业务层说明）
            .service(web::resource("/{id}/evaluate").route(web::post().to(evaluate_answer)))
            // 重新盖章回答时刻 - 所有登录用户可访问
            .service(web::resource("/{id}/answered").route(web::post().to(mark_answered))),
    );
}
