//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_oogiri_bank_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum OogiriBankError {
            $($variant(String),)*
        }

        impl OogiriBankError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(OogiriBankError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(OogiriBankError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(OogiriBankError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl OogiriBankError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        OogiriBankError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_oogiri_bank_errors! {
    DatabaseConfig("E001", "Database Configuration Error"),
    DatabaseConnection("E002", "Database Connection Error"),
    DatabaseOperation("E003", "Database Operation Error"),
    Validation("E004", "Validation Error"),
    UniqueViolation("E005", "Unique Constraint Violation"),
    NotFound("E006", "Resource Not Found"),
    ProtectedReference("E007", "Protected Reference Error"),
    Configuration("E008", "Configuration Error"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Authorization("E012", "Authorization Error"),
    MailDelivery("E013", "Mail Delivery Error"),
}

impl OogiriBankError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for OogiriBankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for OogiriBankError {}

// 为常见的错误类型实现 From trait
impl From<sea_orm::DbErr> for OogiriBankError {
    fn from(err: sea_orm::DbErr) -> Self {
        OogiriBankError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for OogiriBankError {
    fn from(err: std::io::Error) -> Self {
        OogiriBankError::DatabaseConnection(err.to_string())
    }
}

impl From<serde_json::Error> for OogiriBankError {
    fn from(err: serde_json::Error) -> Self {
        OogiriBankError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for OogiriBankError {
    fn from(err: chrono::ParseError) -> Self {
        OogiriBankError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OogiriBankError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(OogiriBankError::database_config("test").code(), "E001");
        assert_eq!(OogiriBankError::validation("test").code(), "E004");
        assert_eq!(OogiriBankError::unique_violation("test").code(), "E005");
        assert_eq!(OogiriBankError::protected_reference("test").code(), "E007");
        assert_eq!(OogiriBankError::configuration("test").code(), "E008");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            OogiriBankError::unique_violation("test").error_type(),
            "Unique Constraint Violation"
        );
        assert_eq!(
            OogiriBankError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = OogiriBankError::validation("username: invalid format");
        assert_eq!(err.message(), "username: invalid format");
    }

    #[test]
    fn test_format_simple() {
        let err = OogiriBankError::validation("display_name too long");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("display_name too long"));
    }
}
