use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DepartmentService;
use crate::models::{ApiResponse, ErrorCode};

/// 删除部门
///
/// 成员关联随外键级联删除，成员账号保持不变。
pub async fn delete_department(
    service: &DepartmentService,
    department_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_department(department_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("部门删除成功"))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::DepartmentNotFound,
            "部门不存在",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::DepartmentDeleteFailed,
                format!("删除部门失败: {e}"),
            )),
        ),
    }
}
