use serde::{Deserialize, Serialize};

// 部门实体（クラス：用户分组，多对多）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
}

// 部门成员关联
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentMember {
    pub id: i64,
    pub department_id: i64,
    pub user_id: i64,
    pub joined_at: chrono::DateTime<chrono::Utc>,
}
