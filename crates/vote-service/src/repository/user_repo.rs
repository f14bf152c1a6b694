//! 用户目录仓储
//!
//! 投票服务对用户表只读，负责把投票人/指派人 ID 解析为展示字段。

use async_trait::async_trait;
use sqlx::PgPool;

use super::traits::UserRepositoryTrait;
use crate::error::Result;
use crate::models::{User, VoteKind};

/// 用户目录仓储
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, full_name, photo, email
            FROM users
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn list_voters(&self, kind: VoteKind, entity_id: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.full_name, u.photo, u.email
            FROM users u
            INNER JOIN votes v ON v.user_id = u.id
            WHERE v.entity_kind = $1 AND v.entity_id = $2
            "#,
        )
        .bind(kind)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}
