use serde::Deserialize;

use crate::errors::OogiriBankError;
use crate::models::common::PaginationQuery;
use crate::utils::validate::{
    normalize_email, normalize_name, validate_display_name, validate_email, validate_username,
};

// 用户查询参数（来自HTTP请求）
#[derive(Debug, Deserialize)]
pub struct UserListParams {
    #[serde(flatten)]
    pub pagination: PaginationQuery,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

// 用户创建请求
//
// 标志位使用 Option 区分「未指定」和「显式 false」：
// create_superuser 要求两个标志要么缺省要么显式为 true。
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub is_staff: Option<bool>,
    #[serde(default)]
    pub is_superuser: Option<bool>,
}

impl CreateUserRequest {
    /// 写前归一化：用户名/显示名去除首尾空白，邮箱域名转小写
    pub fn normalize(&mut self) {
        self.username = normalize_name(&self.username);
        self.display_name = normalize_name(&self.display_name);
        self.email = normalize_email(&self.email);
    }

    /// 字段校验，错误信息指明出错字段
    pub fn validate(&self) -> Result<(), OogiriBankError> {
        validate_username(&self.username)
            .map_err(|msg| OogiriBankError::validation(format!("username: {msg}")))?;
        validate_display_name(&self.display_name)
            .map_err(|msg| OogiriBankError::validation(format!("display_name: {msg}")))?;
        validate_email(&self.email)
            .map_err(|msg| OogiriBankError::validation(format!("email: {msg}")))?;
        Ok(())
    }

    /// 普通用户：缺省的权限标志一律补为 false
    pub fn resolve_member_flags(&mut self) {
        self.is_staff.get_or_insert(false);
        self.is_superuser.get_or_insert(false);
    }

    /// 超级用户：缺省的权限标志补为 true，显式 false 视为配置错误
    pub fn resolve_superuser_flags(&mut self) -> Result<(), OogiriBankError> {
        if !*self.is_staff.get_or_insert(true) {
            return Err(OogiriBankError::configuration(
                "Superuser must have is_staff=true",
            ));
        }
        if !*self.is_superuser.get_or_insert(true) {
            return Err(OogiriBankError::configuration(
                "Superuser must have is_superuser=true",
            ));
        }
        Ok(())
    }
}

// 用户更新请求
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl UpdateUserRequest {
    /// 出现的字段才校验
    pub fn validate(&self) -> Result<(), OogiriBankError> {
        if let Some(ref display_name) = self.display_name {
            validate_display_name(display_name)
                .map_err(|msg| OogiriBankError::validation(format!("display_name: {msg}")))?;
        }
        if let Some(ref email) = self.email {
            validate_email(email)
                .map_err(|msg| OogiriBankError::validation(format!("email: {msg}")))?;
        }
        Ok(())
    }
}

// 用户列表查询参数（用于存储层）
#[derive(Debug, Clone, Deserialize)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub is_staff: Option<bool>,
    pub is_active: Option<bool>,
    pub search: Option<String>,
}

impl From<UserListParams> for UserListQuery {
    fn from(params: UserListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            is_staff: params.is_staff,
            is_active: params.is_active,
            search: params.search,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateUserRequest {
        CreateUserRequest {
            username: "taro_99".to_string(),
            display_name: "太郎".to_string(),
            email: "taro@Example.COM".to_string(),
            password: "plain".to_string(),
            is_staff: None,
            is_superuser: None,
        }
    }

    #[test]
    fn test_member_flags_default_false() {
        let mut req = request();
        req.resolve_member_flags();
        assert_eq!(req.is_staff, Some(false));
        assert_eq!(req.is_superuser, Some(false));
    }

    #[test]
    fn test_superuser_flags_default_true() {
        let mut req = request();
        req.resolve_superuser_flags().unwrap();
        assert_eq!(req.is_staff, Some(true));
        assert_eq!(req.is_superuser, Some(true));
    }

    #[test]
    fn test_superuser_rejects_explicit_false_staff() {
        let mut req = request();
        req.is_staff = Some(false);
        let err = req.resolve_superuser_flags().unwrap_err();
        assert_eq!(err.error_type(), "Configuration Error");
        assert!(err.message().contains("is_staff"));
    }

    #[test]
    fn test_superuser_rejects_explicit_false_superuser() {
        let mut req = request();
        req.is_superuser = Some(false);
        let err = req.resolve_superuser_flags().unwrap_err();
        assert_eq!(err.error_type(), "Configuration Error");
        assert!(err.message().contains("is_superuser"));
    }

    #[test]
    fn test_normalize_lowercases_email_domain() {
        let mut req = request();
        req.username = " taro_99 ".to_string();
        req.normalize();
        assert_eq!(req.username, "taro_99");
        assert_eq!(req.email, "taro@example.com");
    }

    #[test]
    fn test_validate_names_offending_field() {
        let mut req = request();
        req.username = "ab".to_string();
        let err = req.validate().unwrap_err();
        assert!(err.message().starts_with("username:"));

        let mut req = request();
        req.display_name = "12345678901".to_string();
        let err = req.validate().unwrap_err();
        assert!(err.message().starts_with("display_name:"));

        let mut req = request();
        req.email = "not-an-email".to_string();
        let err = req.validate().unwrap_err();
        assert!(err.message().starts_with("email:"));
    }
}
