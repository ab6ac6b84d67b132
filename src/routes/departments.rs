use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::departments::requests::{
    AddDepartmentMemberRequest, CreateDepartmentRequest, DepartmentListParams,
    UpdateDepartmentRequest,
};
use crate::models::users::requests::UserListParams;
use crate::services::DepartmentService;
use crate::utils::{SafeIDI64, SafeUserIdI64};

// 懒加载的全局 DepartmentService 实例
static DEPARTMENT_SERVICE: Lazy<DepartmentService> = Lazy::new(DepartmentService::new_lazy);

// HTTP处理程序
pub async fn list_departments(
    req: HttpRequest,
    query: web::Query<DepartmentListParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .list_departments(query.into_inner(), &req)
        .await
}

pub async fn create_department(
    req: HttpRequest,
    department_data: web::Json<CreateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .create_department(department_data.into_inner(), &req)
        .await
}

pub async fn get_department(
    req: HttpRequest,
    department_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE.get_department(department_id.0, &req).await
}

pub async fn update_department(
    req: HttpRequest,
    department_id: SafeIDI64,
    update_data: web::Json<UpdateDepartmentRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .update_department(department_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_department(
    req: HttpRequest,
    department_id: SafeIDI64,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .delete_department(department_id.0, &req)
        .await
}

pub async fn list_members(
    req: HttpRequest,
    department_id: SafeIDI64,
    query: web::Query<UserListParams>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .list_members(department_id.0, query.into_inner(), &req)
        .await
}

pub async fn add_member(
    req: HttpRequest,
    department_id: SafeIDI64,
    member_data: web::Json<AddDepartmentMemberRequest>,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .add_member(department_id.0, member_data.into_inner(), &req)
        .await
}

pub async fn remove_member(
    req: HttpRequest,
    department_id: SafeIDI64,
    user_id: SafeUserIdI64,
) -> ActixResult<HttpResponse> {
    DEPARTMENT_SERVICE
        .remove_member(department_id.0, user_id.0, &req)
        .await
}

// 配置路由
pub fn configure_departments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/departments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列出部门 - 所有登录用户可访问
                    .route(web::get().to(list_departments))
                    // 创建部门 - 仅 staff
                    .route(
                        web::post()
                            .to(create_department)
                            .wrap(middlewares::RequireFlag::staff()),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 获取部门详情 - 所有登录用户可访问
                    .route(web::get().to(get_department))
                    // 重命名部门 - 仅 staff
                    .route(
                        web::put()
                            .to(update_department)
                            .wrap(middlewares::RequireFlag::staff()),
                    )
                    // 删除部门 - 仅 staff
                    .route(
                        web::delete()
                            .to(delete_department)
                            .wrap(middlewares::RequireFlag::staff()),
                    ),
            )
            .service(
                web::resource("/{id}/members")
                    // 列出部门成员 - 所有登录用户可访问
                    .route(web::get().to(list_members))
                    // 添加部门成员 - 仅 staff
                    .route(
                        web::post()
                            .to(add_member)
                            .wrap(middlewares::RequireFlag::staff()),
                    ),
            )
            .service(
                // 移除部门成员 - 仅 staff
                web::resource("/{id}/members/{user_id}").route(
                    web::delete()
                        .to(remove_member)
                        .wrap(middlewares::RequireFlag::staff()),
                ),
            ),
    );
}
