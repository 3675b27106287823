//! Account storage for Basic authentication

use sea_orm::{EntityTrait, PaginatorTrait, QueryOrder, sea_query::OnConflict};
use tracing::info;

use super::converters::{account_to_active_model, model_to_account};
use super::{SeaOrmStorage, retry};
use crate::errors::{Result, TimeReportError};
use crate::storage::models::Account;

use migration::entities::account;

impl SeaOrmStorage {
    pub async fn find_account(&self, username: &str) -> Result<Option<Account>> {
        let db = &self.db;

        let model = retry::with_retry("find_account", self.retry_config, || async {
            account::Entity::find_by_id(username).one(db).await
        })
        .await
        .map_err(|e| TimeReportError::database_operation(format!("查询账户失败: {}", e)))?;

        Ok(model.map(model_to_account))
    }

    /// 插入或覆盖账户密码（created_at 保留首次创建时间）
    pub async fn upsert_account(&self, acc: &Account) -> Result<()> {
        let db = &self.db;

        retry::with_retry(
            &format!("upsert_account({})", acc.username),
            self.retry_config,
            || async {
                account::Entity::insert(account_to_active_model(acc))
                    .on_conflict(
                        OnConflict::column(account::Column::Username)
                            .update_column(account::Column::PasswordHash)
                            .to_owned(),
                    )
                    .exec_without_returning(db)
                    .await
            },
        )
        .await
        .map_err(|e| TimeReportError::database_operation(format!("保存账户失败: {}", e)))?;

        info!("Account saved: {}", acc.username);
        Ok(())
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>> {
        let db = &self.db;

        let models = retry::with_retry("list_accounts", self.retry_config, || async {
            account::Entity::find()
                .order_by_asc(account::Column::Username)
                .all(db)
                .await
        })
        .await
        .map_err(|e| TimeReportError::database_operation(format!("查询账户列表失败: {}", e)))?;

        Ok(models.into_iter().map(model_to_account).collect())
    }

    /// 删除账户，返回是否存在
    pub async fn remove_account(&self, username: &str) -> Result<bool> {
        let db = &self.db;

        let result = retry::with_retry("remove_account", self.retry_config, || async {
            account::Entity::delete_by_id(username).exec(db).await
        })
        .await
        .map_err(|e| TimeReportError::database_operation(format!("删除账户失败: {}", e)))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_accounts(&self) -> Result<u64> {
        let db = &self.db;

        retry::with_retry("count_accounts", self.retry_config, || async {
            account::Entity::find().count(db).await
        })
        .await
        .map_err(|e| TimeReportError::database_operation(format!("统计账户数量失败: {}", e)))
    }
}
