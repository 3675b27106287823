//! Basic 认证账户管理

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::AuthConfig;
use crate::errors::{Result, TimeReportError};
use crate::storage::{Account, SeaOrmStorage};
use crate::utils::password::{
    check_password_strength, hash_password, is_argon2_hash, verify_password,
};

#[derive(Clone)]
pub struct AccountService {
    storage: Arc<SeaOrmStorage>,
}

impl AccountService {
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// 校验用户名和密码，账户不存在或密码错误均返回 false
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let Some(account) = self.storage.find_account(username).await? else {
            return Ok(false);
        };

        // Argon2 计算较重，放到阻塞线程池
        let password = password.to_string();
        let verified = tokio::task::spawn_blocking(move || {
            verify_password(&password, &account.password_hash)
        })
        .await
        .map_err(|e| TimeReportError::password_hash(format!("密码校验任务失败: {}", e)))??;

        Ok(verified)
    }

    /// 创建账户，已存在时重置密码
    pub async fn set_password(&self, username: &str, password: &str) -> Result<Account> {
        let username = username.trim();
        if username.is_empty() {
            return Err(TimeReportError::validation("用户名不能为空"));
        }
        if username.contains(':') {
            return Err(TimeReportError::validation("用户名不能包含 ':'"));
        }
        check_password_strength(password)
            .map_err(|e| TimeReportError::validation(e.to_string()))?;

        let account = Account {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            created_at: Utc::now(),
        };
        self.storage.upsert_account(&account).await?;
        Ok(account)
    }

    pub async fn list(&self) -> Result<Vec<Account>> {
        self.storage.list_accounts().await
    }

    pub async fn remove(&self, username: &str) -> Result<()> {
        if self.storage.remove_account(username).await? {
            info!("Account removed: {}", username);
            Ok(())
        } else {
            Err(TimeReportError::validation(format!(
                "Account {} not found",
                username
            )))
        }
    }

    /// 按配置创建初始账户（仅在账户不存在时创建）
    pub async fn bootstrap_from_config(&self, auth: &AuthConfig) -> Result<()> {
        match (auth.username.as_deref(), auth.password.as_deref()) {
            (Some(username), Some(password)) => {
                if self.storage.find_account(username).await?.is_none() {
                    // 配置中可以直接写 Argon2 哈希，避免明文密码
                    if is_argon2_hash(password) {
                        self.storage
                            .upsert_account(&Account {
                                username: username.to_string(),
                                password_hash: password.to_string(),
                                created_at: Utc::now(),
                            })
                            .await?;
                    } else {
                        self.set_password(username, password).await?;
                    }
                    info!("Bootstrapped account '{}' from configuration", username);
                }
            }
            (Some(_), None) | (None, Some(_)) => {
                warn!("auth.username and auth.password must both be set; skipping bootstrap");
            }
            (None, None) => {}
        }

        if self.storage.count_accounts().await? == 0 {
            warn!(
                "No accounts configured: every protected endpoint will answer 401. \
                 Create one with `timereport account add <username>`"
            );
        }
        Ok(())
    }
}
