use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::DepartmentService;
use crate::errors::OogiriBankError;
use crate::models::departments::requests::AddDepartmentMemberRequest;
use crate::models::departments::responses::DepartmentMemberResponse;
use crate::models::users::requests::UserListParams;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 部门必须存在，否则返回 404 响应
async fn ensure_department_exists(
    storage: &Arc<dyn Storage>,
    department_id: i64,
) -> Result<(), HttpResponse> {
    match storage.get_department_by_id(department_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "部门不存在",
        ))),
        Err(e) => Err(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询部门失败: {e}"),
            )),
        ),
    }
}

/// 列出部门成员
/// GET /departments/{id}/members
pub async fn list_members(
    service: &DepartmentService,
    department_id: i64,
    params: UserListParams,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = ensure_department_exists(&storage, department_id).await {
        return Ok(resp);
    }

    match storage
        .list_department_members(department_id, params.into())
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询部门成员失败: {e}"),
            )),
        ),
    }
}

/// 添加部门成员
/// POST /departments/{id}/members
pub async fn add_member(
    service: &DepartmentService,
    department_id: i64,
    member_data: AddDepartmentMemberRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if let Err(resp) = ensure_department_exists(&storage, department_id).await {
        return Ok(resp);
    }

    // 成员必须是已存在的用户
    match storage.get_user_by_id(member_data.user_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::UserNotFound,
                "用户不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询用户失败: {e}"),
                )),
            );
        }
    }

    match storage
        .add_department_member(department_id, member_data.user_id)
        .await
    {
        Ok(member) => Ok(HttpResponse::Created().json(ApiResponse::success(
            DepartmentMemberResponse { member },
            "成员添加成功",
        ))),
        Err(OogiriBankError::UniqueViolation(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::DepartmentMemberAlreadyExists, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("添加部门成员失败: {e}"),
            )),
        ),
    }
}

/// 移除部门成员
/// DELETE /departments/{id}/members/{user_id}
pub async fn remove_member(
    service: &DepartmentService,
    department_id: i64,
    user_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .remove_department_member(department_id, user_id)
        .await
    {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("成员移除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentMemberNotFound,
            "该用户不是部门成员",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("移除部门成员失败: {e}"),
            )),
        ),
    }
}
