use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::answers::{Column as AnswerColumn, Entity as Answers};
use crate::entity::questions::{Column as QuestionColumn, Entity as Questions};
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::{OogiriBankError, Result};
use crate::models::{
    PaginationInfo,
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

impl SeaOrmStorage {
    /// 创建用户
    ///
    /// password 字段须为调用方哈希后的值；用户名唯一冲突返回 UniqueViolation。
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = self.clock.timestamp();

        let model = ActiveModel {
            username: Set(req.username.clone()),
            display_name: Set(req.display_name),
            email: Set(req.email),
            password_hash: Set(req.password),
            rate: Set(1500),
            short_match: Set(0),
            long_match: Set(0),
            short_win: Set(0),
            long_win: Set(0),
            is_active: Set(true),
            is_staff: Set(req.is_staff.unwrap_or(false)),
            is_superuser: Set(req.is_superuser.unwrap_or(false)),
            last_login: Set(None),
            date_joined: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                OogiriBankError::unique_violation(format!(
                    "username '{}' already exists",
                    req.username
                ))
            } else {
                OogiriBankError::database_operation(format!("创建用户失败: {e}"))
            }
        })?;

        Ok(result.into_user())
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 通过用户名获取用户
    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询用户失败: {e}")))?;

        Ok(result.map(|m| m.into_user()))
    }

    /// 分页列出用户
    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Users::find();

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::DisplayName.contains(&escaped))
                    .add(Column::Email.contains(&escaped)),
            );
        }

        // 权限筛选
        if let Some(is_staff) = query.is_staff {
            select = select.filter(Column::IsStaff.eq(is_staff));
        }

        // 状态筛选
        if let Some(is_active) = query.is_active {
            select = select.filter(Column::IsActive.eq(is_active));
        }

        // 排序
        select = select.order_by_desc(Column::DateJoined);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询用户总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询用户页数失败: {e}")))?;

        let users = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询用户列表失败: {e}")))?;

        Ok(UserListResponse {
            items: users.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新用户最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = self.clock.timestamp();

        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                OogiriBankError::database_operation(format!("更新最后登录时间失败: {e}"))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// 更新用户信息
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        // 先检查用户是否存在
        let existing = self.get_user_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            ..Default::default()
        };

        if let Some(display_name) = update.display_name {
            model.display_name = Set(display_name);
        }

        if let Some(email) = update.email {
            model.email = Set(email);
        }

        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }

        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        if let Some(is_staff) = update.is_staff {
            model.is_staff = Set(is_staff);
        }

        if let Some(is_superuser) = update.is_superuser {
            model.is_superuser = Set(is_superuser);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("更新用户失败: {e}")))?;

        self.get_user_by_id_impl(id).await
    }

    /// 删除用户
    ///
    /// 仍有题目或回答引用该用户时拒绝删除（protect-on-delete）。
    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let question_count = Questions::find()
            .filter(QuestionColumn::QuestionerId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询题目引用失败: {e}")))?;

        let answer_count = Answers::find()
            .filter(AnswerColumn::PanelistId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询回答引用失败: {e}")))?;

        if question_count > 0 || answer_count > 0 {
            return Err(OogiriBankError::protected_reference(format!(
                "user {id} is still referenced by {question_count} question(s) and {answer_count} answer(s)"
            )));
        }

        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("删除用户失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 统计用户数量
    pub async fn count_users_impl(&self) -> Result<u64> {
        let count = Users::find()
            .count(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("统计用户数量失败: {e}")))?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{fixed_clock, storage_with_clock, user_request};
    use crate::models::questions::requests::CreateQuestionRequest;
    use crate::models::users::requests::UserListQuery;

    #[tokio::test]
    async fn test_create_user_defaults() {
        let storage = storage_with_clock(fixed_clock()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();

        assert_eq!(user.username, "taro_99");
        assert_eq!(user.rate, 1500);
        assert_eq!(user.short_match, 0);
        assert!(user.is_active);
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
        assert!(user.last_login.is_none());
        assert_eq!(user.date_joined.timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_unique_violation() {
        let storage = storage_with_clock(fixed_clock()).await;
        storage.create_user_impl(user_request("taro_99")).await.unwrap();

        let err = storage
            .create_user_impl(user_request("taro_99"))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "Unique Constraint Violation");
    }

    #[tokio::test]
    async fn test_superuser_flags_persisted() {
        let storage = storage_with_clock(fixed_clock()).await;
        let mut request = user_request("admin_user");
        request.resolve_superuser_flags().unwrap();

        let user = storage.create_user_impl(request).await.unwrap();
        assert!(user.is_staff);
        assert!(user.is_superuser);
    }

    #[tokio::test]
    async fn test_update_last_login_stamps_clock() {
        let clock = fixed_clock();
        let storage = storage_with_clock(clock.clone()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();

        clock.advance(chrono::Duration::seconds(30));
        assert!(storage.update_last_login_impl(user.id).await.unwrap());

        let reloaded = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert_eq!(
            reloaded.last_login.unwrap().timestamp(),
            1_700_000_030
        );
    }

    #[tokio::test]
    async fn test_delete_user_without_references() {
        let storage = storage_with_clock(fixed_clock()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();

        assert!(storage.delete_user_impl(user.id).await.unwrap());
        assert!(storage.get_user_by_id_impl(user.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_user_blocked_by_question() {
        let storage = storage_with_clock(fixed_clock()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();
        storage
            .create_question_impl(
                user.id,
                CreateQuestionRequest {
                    text: "こんな学校は嫌だ".to_string(),
                },
            )
            .await
            .unwrap();

        let err = storage.delete_user_impl(user.id).await.unwrap_err();
        assert_eq!(err.error_type(), "Protected Reference Error");

        // 用户仍然存在
        assert!(storage.get_user_by_id_impl(user.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_list_users_filters_staff() {
        let storage = storage_with_clock(fixed_clock()).await;
        storage.create_user_impl(user_request("member_1")).await.unwrap();
        let mut staff = user_request("staff_user");
        staff.is_staff = Some(true);
        storage.create_user_impl(staff).await.unwrap();

        let result = storage
            .list_users_with_pagination_impl(UserListQuery {
                page: Some(1),
                size: Some(10),
                is_staff: Some(true),
                is_active: None,
                search: None,
            })
            .await
            .unwrap();

        assert_eq!(result.pagination.total, 1);
        assert_eq!(result.items[0].username, "staff_user");
    }
}
