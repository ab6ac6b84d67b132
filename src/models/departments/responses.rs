use super::entities::{Department, DepartmentMember};
use crate::models::common::PaginationInfo;
use serde::Serialize;

// 部门响应
#[derive(Debug, Serialize)]
pub struct DepartmentResponse {
    pub department: Department,
}

// 部门列表响应
#[derive(Debug, Serialize)]
pub struct DepartmentListResponse {
    pub items: Vec<Department>,
    pub pagination: PaginationInfo,
}

// 部门成员响应
#[derive(Debug, Serialize)]
pub struct DepartmentMemberResponse {
    pub member: DepartmentMember,
}
