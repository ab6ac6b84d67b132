use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::errors::OogiriBankError;
use crate::models::{
    ApiResponse, ErrorCode,
    departments::{requests::CreateDepartmentRequest, responses::DepartmentResponse},
};

pub async fn create_department(
    service: &DepartmentService,
    mut department_data: CreateDepartmentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    department_data.normalize();
    if let Err(e) = department_data.validate() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNameInvalid,
            e.message(),
        )));
    }

    let storage = service.get_storage(request);

    match storage.create_department(department_data).await {
        Ok(department) => Ok(HttpResponse::Created().json(ApiResponse::success(
            DepartmentResponse { department },
            "部门创建成功",
        ))),
        Err(OogiriBankError::UniqueViolation(msg)) => Ok(HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::DepartmentAlreadyExists, msg),
        )),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DepartmentCreationFailed,
                format!("创建部门失败: {e}"),
            )),
        ),
    }
}
