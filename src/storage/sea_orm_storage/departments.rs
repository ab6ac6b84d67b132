use super::{SeaOrmStorage, is_unique_violation};
use crate::entity::department_users::{
    ActiveModel as DepartmentUserActiveModel, Column as DepartmentUserColumn,
    Entity as DepartmentUsers,
};
use crate::entity::departments::{ActiveModel, Column, Entity as Departments};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{OogiriBankError, Result};
use crate::models::{
    PaginationInfo,
    departments::{
        entities::{Department, DepartmentMember},
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
        responses::DepartmentListResponse,
    },
    users::{requests::UserListQuery, responses::UserListResponse},
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

impl SeaOrmStorage {
    /// 创建部门
    pub async fn create_department_impl(&self, req: CreateDepartmentRequest) -> Result<Department> {
        let model = ActiveModel {
            name: Set(req.name.clone()),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                OogiriBankError::unique_violation(format!(
                    "department '{}' already exists",
                    req.name
                ))
            } else {
                OogiriBankError::database_operation(format!("创建部门失败: {e}"))
            }
        })?;

        Ok(result.into_department())
    }

    /// 通过 ID 获取部门
    pub async fn get_department_by_id_impl(&self, id: i64) -> Result<Option<Department>> {
        let result = Departments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询部门失败: {e}")))?;

        Ok(result.map(|m| m.into_department()))
    }

    /// 分页列出部门
    pub async fn list_departments_with_pagination_impl(
        &self,
        query: DepartmentListQuery,
    ) -> Result<DepartmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Departments::find();

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        select = select.order_by_asc(Column::Name);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询部门总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询部门页数失败: {e}")))?;

        let departments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询部门列表失败: {e}")))?;

        Ok(DepartmentListResponse {
            items: departments
                .into_iter()
                .map(|m| m.into_department())
                .collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 重命名部门
    pub async fn update_department_impl(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        let existing = self.get_department_by_id_impl(id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(id),
            name: Set(update.name.clone()),
        };

        model.update(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                OogiriBankError::unique_violation(format!(
                    "department '{}' already exists",
                    update.name
                ))
            } else {
                OogiriBankError::database_operation(format!("重命名部门失败: {e}"))
            }
        })?;

        self.get_department_by_id_impl(id).await
    }

    /// 删除部门
    ///
    /// 关联记录随外键级联删除，成员账号本身不受影响。
    pub async fn delete_department_impl(&self, id: i64) -> Result<bool> {
        let result = Departments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("删除部门失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 添加部门成员
    pub async fn add_department_member_impl(
        &self,
        department_id: i64,
        user_id: i64,
    ) -> Result<DepartmentMember> {
        let now = self.clock.timestamp();

        let model = DepartmentUserActiveModel {
            department_id: Set(department_id),
            user_id: Set(user_id),
            joined_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                OogiriBankError::unique_violation(format!(
                    "user {user_id} is already a member of department {department_id}"
                ))
            } else {
                OogiriBankError::database_operation(format!("添加部门成员失败: {e}"))
            }
        })?;

        Ok(result.into_department_member())
    }

    /// 移除部门成员
    pub async fn remove_department_member_impl(
        &self,
        department_id: i64,
        user_id: i64,
    ) -> Result<bool> {
        let result = DepartmentUsers::delete_many()
            .filter(DepartmentUserColumn::DepartmentId.eq(department_id))
            .filter(DepartmentUserColumn::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("移除部门成员失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出部门成员
    pub async fn list_department_members_impl(
        &self,
        department_id: i64,
        query: UserListQuery,
    ) -> Result<UserListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let member_ids = DepartmentUsers::find()
            .filter(DepartmentUserColumn::DepartmentId.eq(department_id))
            .select_only()
            .column(DepartmentUserColumn::UserId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询部门成员失败: {e}")))?;

        let select = Users::find()
            .filter(UserColumn::Id.is_in(member_ids))
            .order_by_asc(UserColumn::Username);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询成员总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询成员页数失败: {e}")))?;

        let members = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询成员列表失败: {e}")))?;

        Ok(UserListResponse {
            items: members.into_iter().map(|m| m.into_user()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出用户所属部门
    pub async fn list_user_departments_impl(&self, user_id: i64) -> Result<Vec<Department>> {
        let department_ids = DepartmentUsers::find()
            .filter(DepartmentUserColumn::UserId.eq(user_id))
            .select_only()
            .column(DepartmentUserColumn::DepartmentId)
            .into_tuple::<i64>()
            .all(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询所属部门失败: {e}")))?;

        let departments = Departments::find()
            .filter(Column::Id.is_in(department_ids))
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| OogiriBankError::database_operation(format!("查询部门失败: {e}")))?;

        Ok(departments
            .into_iter()
            .map(|m| m.into_department())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{fixed_clock, storage_with_clock, user_request};
    use crate::models::departments::requests::{
        CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest,
    };
    use crate::models::users::requests::UserListQuery;

    fn department(name: &str) -> CreateDepartmentRequest {
        CreateDepartmentRequest {
            name: name.to_string(),
        }
    }

    fn member_query() -> UserListQuery {
        UserListQuery {
            page: Some(1),
            size: Some(10),
            is_staff: None,
            is_active: None,
            search: None,
        }
    }

    #[tokio::test]
    async fn test_duplicate_department_name_is_unique_violation() {
        let storage = storage_with_clock(fixed_clock()).await;
        storage.create_department_impl(department("3年B組")).await.unwrap();

        let err = storage
            .create_department_impl(department("3年B組"))
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "Unique Constraint Violation");
    }

    #[tokio::test]
    async fn test_rename_department() {
        let storage = storage_with_clock(fixed_clock()).await;
        let dept = storage.create_department_impl(department("旧組")).await.unwrap();

        let renamed = storage
            .update_department_impl(
                dept.id,
                UpdateDepartmentRequest {
                    name: "新組".to_string(),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "新組");
    }

    #[tokio::test]
    async fn test_membership_roundtrip() {
        let storage = storage_with_clock(fixed_clock()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();
        let dept = storage.create_department_impl(department("3年B組")).await.unwrap();

        storage
            .add_department_member_impl(dept.id, user.id)
            .await
            .unwrap();

        let members = storage
            .list_department_members_impl(dept.id, member_query())
            .await
            .unwrap();
        assert_eq!(members.pagination.total, 1);

        let departments = storage.list_user_departments_impl(user.id).await.unwrap();
        assert_eq!(departments.len(), 1);
        assert_eq!(departments[0].name, "3年B組");

        // 同一成员不能重复加入
        let err = storage
            .add_department_member_impl(dept.id, user.id)
            .await
            .unwrap_err();
        assert_eq!(err.error_type(), "Unique Constraint Violation");

        assert!(
            storage
                .remove_department_member_impl(dept.id, user.id)
                .await
                .unwrap()
        );
        assert!(storage.list_user_departments_impl(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_department_keeps_members() {
        let storage = storage_with_clock(fixed_clock()).await;
        let user = storage.create_user_impl(user_request("taro_99")).await.unwrap();
        let dept = storage.create_department_impl(department("3年B組")).await.unwrap();
        storage
            .add_department_member_impl(dept.id, user.id)
            .await
            .unwrap();

        assert!(storage.delete_department_impl(dept.id).await.unwrap());

        // 成员账号原样保留，仅失去部门关联
        let survivor = storage.get_user_by_id_impl(user.id).await.unwrap().unwrap();
        assert_eq!(survivor.username, "taro_99");
        assert_eq!(survivor.rate, 1500);
        assert!(storage.list_user_departments_impl(user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_departments_sorted_by_name() {
        let storage = storage_with_clock(fixed_clock()).await;
        storage.create_department_impl(department("b_kumi")).await.unwrap();
        storage.create_department_impl(department("a_kumi")).await.unwrap();

        let result = storage
            .list_departments_with_pagination_impl(DepartmentListQuery {
                page: Some(1),
                size: Some(10),
                search: None,
            })
            .await
            .unwrap();

        assert_eq!(result.pagination.total, 2);
        assert_eq!(result.items[0].name, "a_kumi");
    }
}
