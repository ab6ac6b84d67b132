pub mod answers;
pub mod auth;
pub mod departments;
pub mod questions;
pub mod users;

pub use answers::AnswerService;
pub use auth::AuthService;
pub use departments::DepartmentService;
pub use questions::QuestionService;
pub use users::UserService;
