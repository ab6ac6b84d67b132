use crate::models::users::requests::CreateUserRequest;
use crate::storage::Storage;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认超级用户
/// 如果数据库中没有任何用户，则创建一个默认的 admin 账号
async fn seed_superuser(storage: &Arc<dyn Storage>) {
    // 检查是否已有用户
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!(
                "Database already has {} user(s), skipping superuser seed",
                count
            );
            return;
        }
        Ok(_) => {
            info!("No users found in database, creating default superuser account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping superuser seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    // 哈希密码
    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!(
                "Failed to hash superuser password: {}, skipping superuser seed",
                e
            );
            return;
        }
    };

    // 创建超级用户（staff 与 superuser 标志均须为真）
    let mut admin_request = CreateUserRequest {
        username: "admin".to_string(),
        display_name: "管理者".to_string(),
        email: String::new(),
        password: password_hash,
        is_staff: None,
        is_superuser: None,
    };
    if let Err(e) = admin_request.resolve_superuser_flags() {
        warn!("Invalid superuser flags: {}, skipping superuser seed", e);
        return;
    }

    match storage.create_user(admin_request).await {
        Ok(user) => {
            info!(
                "Default superuser account created successfully (ID: {}, username: {})",
                user.id, user.username
            );
        }
        Err(e) => {
            warn!("Failed to create superuser account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储初始化和超级用户种子
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    // 初始化默认超级用户（如果需要）
    seed_superuser(&storage).await;

    StartupContext { storage }
}
