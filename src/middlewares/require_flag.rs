/*!
 * 基于权限标志的访问控制中间件
 *
 * 此中间件必须在 RequireJWT 中间件之后使用，用于验证用户的 is_staff /
 * is_superuser 标志。
 *
 * ## 使用方法
 *
 * ```rust,ignore
 * use actix_web::{web, App, HttpServer};
 * use crate::middlewares::require_jwt::RequireJWT;
 * use crate::middlewares::require_flag::RequireFlag;
 *
 * HttpServer::new(|| {
 *     App::new()
 *         .service(
 *             web::scope("/api")
 *                 .wrap(RequireJWT)  // 先验证JWT
 *                 .service(
 *                     web::scope("/admin")
 *                         .wrap(RequireFlag::staff())  // 再验证标志
 *                         .route("/users", web::get().to(admin_users_handler))
 *                 )
 *         )
 * })
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{ErrorCode, users::entities::User};

use super::create_error_response;

/// 需要哪一个权限标志
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RequiredFlag {
    Staff,
    Superuser,
}

#[derive(Clone)]
pub struct RequireFlag {
    required: RequiredFlag,
}

impl RequireFlag {
    /// 需要 is_staff=true（超级用户天然放行）
    pub fn staff() -> Self {
        Self {
            required: RequiredFlag::Staff,
        }
    }

    /// 需要 is_superuser=true
    pub fn superuser() -> Self {
        Self {
            required: RequiredFlag::Superuser,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireFlag
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireFlagMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireFlagMiddleware {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct RequireFlagMiddleware<S> {
    service: Rc<S>,
    required: RequiredFlag,
}

impl<S, B> Service<ServiceRequest> for RequireFlagMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let required = self.required;

        Box::pin(async move {
            // 从请求扩展中获取用户信息
            let user = req.extensions().get::<User>().cloned();

            match user {
                Some(user) => {
                    let has_permission = match required {
                        RequiredFlag::Staff => user.is_staff || user.is_superuser,
                        RequiredFlag::Superuser => user.is_superuser,
                    };

                    if has_permission {
                        let res = srv.call(req).await?.map_into_left_body();
                        Ok(res)
                    } else {
                        info!(
                            "Access denied for user {} (staff: {}, superuser: {}). Required flag: {:?}",
                            user.id, user.is_staff, user.is_superuser, required
                        );
                        Ok(req.into_response(
                            create_error_response(
                                StatusCode::FORBIDDEN,
                                ErrorCode::Forbidden,
                                "Access denied.",
                            )
                            .map_into_right_body(),
                        ))
                    }
                }
                None => {
                    info!(
                        "Flag check failed: No user found in request. Make sure RequireJWT middleware is applied first."
                    );
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            "Authentication required",
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}
