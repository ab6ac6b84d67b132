pub mod answers;

pub mod auth;

pub mod departments;

pub mod questions;

pub mod users;

pub use answers::configure_answers_routes;
pub use auth::configure_auth_routes;
pub use departments::configure_departments_routes;
pub use questions::configure_questions_routes;
pub use users::configure_user_routes;
