use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::errors::OogiriBankError;
use crate::models::{
    ApiResponse, ErrorCode,
    departments::{requests::UpdateDepartmentRequest, responses::DepartmentResponse},
};

pub async fn update_department(
    service: &DepartmentService,
    department_id: i64,
    mut update_data: UpdateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    update_data.normalize();
    if let Err(e) = update_data.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNameInvalid,
            e.message(),
        )));
    }

    let storage = service.get_storage(request);

    match storage.update_department(department_id, update_data).await {
        Ok(Some(department)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            DepartmentResponse { department },
            "部门更新成功",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "部门不存在",
        ))),
        Err(OogiriBankError::UniqueViolation(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::DepartmentAlreadyExists, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DepartmentUpdateFailed,
                format!("更新部门失败: {e}"),
            )),
        ),
    }
}
