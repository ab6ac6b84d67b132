use serde::Deserialize;

use crate::errors::OogiriBankError;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{normalize_name, validate_department_name};

// 部门查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct DepartmentListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}

// 部门创建请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDepartmentRequest {
    pub name: String,
}

impl CreateDepartmentRequest {
    pub fn normalize(&mut self) {
        self.name = normalize_name(&self.name);
    }

    pub fn validate(&self) -> Result<(), OogiriBankError> {
        validate_department_name(&self.name)
            .map_err(|msg| OogiriBankError::validation(format!("name: {msg}")))
    }
}

// 部门更新请求（重命名）
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDepartmentRequest {
    pub name: String,
}

impl UpdateDepartmentRequest {
    pub fn normalize(&mut self) {
        self.name = normalize_name(&self.name);
    }

    pub fn validate(&self) -> Result<(), OogiriBankError> {
        validate_department_name(&self.name)
            .map_err(|msg| OogiriBankError::validation(format!("name: {msg}")))
    }
}

// 添加部门成员请求
#[derive(Debug, Clone, Deserialize)]
pub struct AddDepartmentMemberRequest {
    pub user_id: i64,
}

// 部门列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize)]
pub struct DepartmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
}

impl From<DepartmentListParams> for DepartmentListQuery {
    fn from(params: DepartmentListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
        }
    }
}
