use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{ApiResponse, ErrorCode, users::requests::CreateUserRequest};
use crate::utils::mailer::email_user;
use crate::utils::password::hash_password;

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    mut create_request: CreateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let config = service.get_config();

    // 1. 归一化并校验字段
    create_request.normalize();
    if let Err(e) = create_request.validate() {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, e.message())));
    }

    // 2. 自助注册一律是普通用户，不接受请求中的权限标志
    create_request.is_staff = Some(false);
    create_request.is_superuser = Some(false);

    // 3. 哈希密码
    match hash_password(&create_request.password) {
        Ok(password_hash) => {
            // 将明文密码替换为哈希后的密码
            create_request.password = password_hash;

            // 4. 创建用户
            match storage.create_user(create_request).await {
                Ok(user) => {
                    // 5. 发送欢迎邮件（失败只记录，不影响注册）
                    if !user.email.is_empty() {
                        let subject = format!("Welcome to {}", config.app.system_name);
                        let body = format!(
                            "{}さん、ようこそ！アカウント {} が作成されました。",
                            user.display_name, user.username
                        );
                        if let Err(e) = email_user(&user, &subject, &body).await {
                            tracing::warn!("Welcome mail to {} failed: {}", user.username, e);
                        }
                    }

                    Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功")))
                }
                Err(e) => match e {
                    crate::errors::OogiriBankError::UniqueViolation(_) => {
                        Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                            ErrorCode::UserAlreadyExists,
                            "Username already exists",
                        )))
                    }
                    _ => Ok(
                        HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                            ErrorCode::RegisterFailed,
                            format!("注册失败: {e}"),
                        )),
                    ),
                },
            }
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                format!("密码哈希失败: {e}"),
            )),
        ),
    }
}
