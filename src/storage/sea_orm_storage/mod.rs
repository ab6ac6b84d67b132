//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod answers;
mod departments;
mod questions;
mod users;

use crate::config::AppConfig;
use crate::errors::{OogiriBankError, Result};
use crate::utils::clock::{Clock, SystemClock};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
///
/// 所有业务时间戳都取自注入的 clock，测试可替换为固定时钟。
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
    pub(crate) clock: Arc<dyn Clock>,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self::with_clock(db, Arc::new(SystemClock)))
    }

    /// 使用指定连接与时钟构建存储
    pub fn with_clock(db: DatabaseConnection, clock: Arc<dyn Clock>) -> Self {
        Self { db, clock }
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| OogiriBankError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| OogiriBankError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| OogiriBankError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(OogiriBankError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

/// 唯一约束冲突判定（SQLite / PostgreSQL / MySQL 的报错文案）
pub(crate) fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
    let msg = err.to_string();
    msg.contains("UNIQUE constraint failed")
        || msg.contains("duplicate key value")
        || msg.contains("Duplicate entry")
}

// Storage trait 实现
use crate::models::{
    answers::{
        entities::Answer,
        requests::{AnswerListQuery, CreateAnswerRequest},
        responses::AnswerListResponse,
    },
    departments::{
        entities::{Department, DepartmentMember},
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
        responses::DepartmentListResponse,
    },
    questions::{
        entities::Question,
        requests::{CreateQuestionRequest, QuestionListQuery},
        responses::QuestionListResponse,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 部门模块
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(department).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse> {
        self.list_departments_with_pagination_impl(query).await
    }

    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, update).await
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    async fn add_department_member(
        &self,
        department_id: i64,
        user_id: i64,
    ) -> Result<DepartmentMember> {
        self.add_department_member_impl(department_id, user_id)
            .await
    }

    async fn remove_department_member(&self, department_id: i64, user_id: i64) -> Result<bool> {
        self.remove_department_member_impl(department_id, user_id)
            .await
    }

    async fn list_department_members(
        &self,
        department_id: i64,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        self.list_department_members_impl(department_id, query)
            .await
    }

    async fn list_user_departments(&self, user_id: i64) -> Result<Vec<Department>> {
        self.list_user_departments_impl(user_id).await
    }

    // 题目模块
    async fn create_question(
        &self,
        questioner_id: i64,
        question: CreateQuestionRequest,
    ) -> Result<Question> {
        self.create_question_impl(questioner_id, question).await
    }

    async fn get_question_by_id(&self, id: i64) -> Result<Option<Question>> {
        self.get_question_by_id_impl(id).await
    }

    async fn list_questions_with_pagination(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse> {
        self.list_questions_with_pagination_impl(query).await
    }

    async fn ask_question(&self, id: i64) -> Result<Option<Question>> {
        self.ask_question_impl(id).await
    }

    async fn record_evaluation(&self, id: i64) -> Result<Option<Question>> {
        self.record_evaluation_impl(id).await
    }

    async fn get_current_question(&self) -> Result<Option<Question>> {
        self.get_current_question_impl().await
    }

    async fn delete_question(&self, id: i64) -> Result<bool> {
        self.delete_question_impl(id).await
    }

    // 回答模块
    async fn create_answer(
        &self,
        question_id: i64,
        panelist_id: i64,
        answer: CreateAnswerRequest,
    ) -> Result<Answer> {
        self.create_answer_impl(question_id, panelist_id, answer)
            .await
    }

    async fn get_answer_by_id(&self, id: i64) -> Result<Option<Answer>> {
        self.get_answer_by_id_impl(id).await
    }

    async fn list_question_answers(
        &self,
        question_id: i64,
        query: AnswerListQuery,
    ) -> Result<AnswerListResponse> {
        self.list_question_answers_impl(question_id, query).await
    }

    async fn evaluate_answer(&self, id: i64, point: i32) -> Result<Option<Answer>> {
        self.evaluate_answer_impl(id, point).await
    }

    async fn mark_answered(&self, id: i64) -> Result<Option<Answer>> {
        self.mark_answered_impl(id).await
    }

    async fn delete_answer(&self, id: i64) -> Result<bool> {
        self.delete_answer_impl(id).await
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::utils::clock::{Clock, FixedClock};
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;
    use std::sync::Arc;

    /// 基于内存 SQLite 的测试存储
    ///
    /// 内存库必须保持单连接，否则池中每个连接各自为一个空库。
    pub async fn storage_with_clock(clock: Arc<FixedClock>) -> SeaOrmStorage {
        let mut options = sea_orm::ConnectOptions::new("sqlite::memory:");
        options.max_connections(1);
        let db = Database::connect(options)
            .await
            .expect("Failed to open in-memory sqlite");
        Migrator::up(&db, None).await.expect("Migration failed");
        SeaOrmStorage::with_clock(db, clock as Arc<dyn Clock>)
    }

    pub fn fixed_clock() -> Arc<FixedClock> {
        let start = chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        Arc::new(FixedClock::at(start))
    }

    /// 已哈希密码的用户创建请求（权限标志留空，按需解析）
    pub fn user_request(username: &str) -> crate::models::users::requests::CreateUserRequest {
        crate::models::users::requests::CreateUserRequest {
            username: username.to_string(),
            display_name: username.chars().take(10).collect(),
            email: format!("{username}@example.com"),
            password: crate::utils::password::hash_password("S3cret-pass").unwrap(),
            is_staff: None,
            is_superuser: None,
        }
    }
}
