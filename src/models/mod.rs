pub mod answers;
pub mod auth;
pub mod common;
pub mod departments;
pub mod questions;
pub mod users;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 程序启动时间（用于运行时长统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// code 为 0 表示成功，非 0 按资源分段：
/// 4xxxx 请求类错误，41xxx 用户，42xxx 部门，43xxx 题目，44xxx 回答。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 40000,
    Unauthorized = 40100,
    AuthFailed = 40101,
    Forbidden = 40300,
    NotFound = 40400,
    InternalServerError = 50000,

    UserNotFound = 41001,
    UserNameInvalid = 41002,
    UserDisplayNameInvalid = 41003,
    UserEmailInvalid = 41004,
    UserAlreadyExists = 41005,
    UserCreationFailed = 41006,
    UserUpdateFailed = 41007,
    UserDeleteFailed = 41008,
    UserProtected = 41009,
    RegisterFailed = 41010,
    SuperuserFlagsInvalid = 41011,

    DepartmentNotFound = 42001,
    DepartmentNameInvalid = 42002,
    DepartmentAlreadyExists = 42003,
    DepartmentCreationFailed = 42004,
    DepartmentUpdateFailed = 42005,
    DepartmentDeleteFailed = 42006,
    DepartmentMemberNotFound = 42007,
    DepartmentMemberAlreadyExists = 42008,

    QuestionNotFound = 43001,
    QuestionTextInvalid = 43002,
    QuestionCreationFailed = 43003,
    QuestionAskFailed = 43004,
    QuestionDeleteFailed = 43005,
    NoCurrentQuestion = 43006,

    AnswerNotFound = 44001,
    AnswerTextInvalid = 44002,
    AnswerCreationFailed = 44003,
    AnswerEvaluateFailed = 44004,
    AnswerDeleteFailed = 44005,
}
