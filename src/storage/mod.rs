use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（password 字段须已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户（仍有题目/回答引用时返回 ProtectedReference 错误）
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 部门管理方法
    // 创建部门
    async fn create_department(&self, department: CreateDepartmentRequest) -> Result<Department>;
    // 通过ID获取部门信息
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    // 列出部门
    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse>;
    // 重命名部门
    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    // 删除部门（关联记录级联删除，成员账号不受影响）
    async fn delete_department(&self, id: i64) -> Result<bool>;
    // 添加部门成员
    async fn add_department_member(
        &self,
        department_id: i64,
        user_id: i64,
    ) -> Result<DepartmentMember>;
    // 移除部门成员
    async fn remove_department_member(&self, department_id: i64, user_id: i64) -> Result<bool>;
    // 列出部门成员
    async fn list_department_members(
        &self,
        department_id: i64,
        query: UserListQuery,
    ) -> Result<UserListResponse>;
    // 列出用户所属部门
    async fn list_user_departments(&self, user_id: i64) -> Result<Vec<Department>>;

    /// 题目管理方法
    // 创建题目
    async fn create_question(
        &self,
        questioner_id: i64,
        question: CreateQuestionRequest,
    ) -> Result<Question>;
    // 通过ID获取题目信息
    async fn get_question_by_id(&self, id: i64) -> Result<Option<Question>>;
    // 按出题时刻排序列出题目
    async fn list_questions_with_pagination(
        &self,
        query: QuestionListQuery,
    ) -> Result<QuestionListResponse>;
    // 出题：刷新出题时刻并置位 was_asked（可重复调用，仅重新盖章）
    async fn ask_question(&self, id: i64) -> Result<Option<Question>>;
    // 记录一次采点：计数器加一，达到配额后置位 was_evaluated
    async fn record_evaluation(&self, id: i64) -> Result<Option<Question>>;
    // 获取当前出题中的题目（最新的已出题且未采点完成）
    async fn get_current_question(&self) -> Result<Option<Question>>;
    // 删除题目（回答级联删除）
    async fn delete_question(&self, id: i64) -> Result<bool>;

    /// 回答管理方法
    // 创建回答
    async fn create_answer(
        &self,
        question_id: i64,
        panelist_id: i64,
        answer: CreateAnswerRequest,
    ) -> Result<Answer>;
    // 通过ID获取回答信息
    async fn get_answer_by_id(&self, id: i64) -> Result<Option<Answer>>;
    // 列出题目下的回答
    async fn list_question_answers(
        &self,
        question_id: i64,
        query: AnswerListQuery,
    ) -> Result<AnswerListResponse>;
    // 采点：score += point（允许负分，无幂等保护）
    async fn evaluate_answer(&self, id: i64, point: i32) -> Result<Option<Answer>>;
    // 重新盖章回答时刻
    async fn mark_answered(&self, id: i64) -> Result<Option<Answer>>;
    // 删除回答
    async fn delete_answer(&self, id: i64) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
