use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::errors::OogiriBankError;
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::CreateUserRequest, responses::UserResponse},
};
use crate::utils::password::hash_password;

/// 创建普通用户（缺省权限标志补为 false）
pub async fn create_user(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    user_data.resolve_member_flags();
    create_validated(service, user_data, request).await
}

/// 创建超级用户
///
/// 权限标志缺省补为 true；显式传入 false 视为配置错误，直接拒绝。
pub async fn create_superuser(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(e) = user_data.resolve_superuser_flags() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SuperuserFlagsInvalid,
            e.message(),
        )));
    }
    create_validated(service, user_data, request).await
}

async fn create_validated(
    service: &UserService,
    mut user_data: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 归一化与字段校验
    user_data.normalize();
    if let Err(e) = user_data.validate() {
        let code = match e.message() {
            msg if msg.starts_with("username:") => ErrorCode::UserNameInvalid,
            msg if msg.starts_with("display_name:") => ErrorCode::UserDisplayNameInvalid,
            _ => ErrorCode::UserEmailInvalid,
        };
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(code, e.message())));
    }

    user_data.password = match hash_password(&user_data.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    let storage = service.get_storage(request);

    match storage.create_user(user_data).await {
        Ok(user) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(UserResponse { user }, "用户创建成功"))),
        Err(OogiriBankError::UniqueViolation(msg)) => {
            Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserAlreadyExists,
                msg,
            )))
        }
        Err(e) => {
            let msg = format!("User creation failed: {e}");
            error!("{}", msg);
            Ok(HttpResponse::InternalServerError()
                .json(ApiResponse::error_empty(ErrorCode::UserCreationFailed, msg)))
        }
    }
}
