//! 投票成员关系仓储
//!
//! 提供 votes 表的数据访问。(entity_kind, entity_id, user_id) 上的唯一
//! 约束是并发投票的串行化点：冲突方在插入时拿到空结果而不是错误。

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::traits::VoteRepositoryTrait;
use crate::error::Result;
use crate::models::{Vote, VoteKind};

/// 投票成员关系仓储
pub struct VoteRepository {
    pool: PgPool,
}

impl VoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 事务操作 ====================

    /// 在事务中尝试创建投票记录
    ///
    /// 记录已存在（唯一约束冲突）时返回 None，调用方按幂等无操作处理。
    /// 只有真正插入了新行才允许增加计数器。
    pub async fn try_create_in_tx(
        tx: &mut PgConnection,
        kind: VoteKind,
        entity_id: i64,
        user_id: i64,
    ) -> Result<Option<Vote>> {
        let vote = sqlx::query_as::<_, Vote>(
            r#"
            INSERT INTO votes (entity_kind, entity_id, user_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (entity_kind, entity_id, user_id) DO NOTHING
            RETURNING id, entity_kind, entity_id, user_id, created_at
            "#,
        )
        .bind(kind)
        .bind(entity_id)
        .bind(user_id)
        .fetch_optional(tx)
        .await?;

        Ok(vote)
    }

    /// 在事务中删除投票记录
    ///
    /// 返回是否确实删除了一行；记录不存在时返回 false，不报错
    pub async fn delete_in_tx(
        tx: &mut PgConnection,
        kind: VoteKind,
        entity_id: i64,
        user_id: i64,
    ) -> Result<bool> {
        let deleted = sqlx::query_scalar::<_, i64>(
            r#"
            DELETE FROM votes
            WHERE entity_kind = $1 AND entity_id = $2 AND user_id = $3
            RETURNING id
            "#,
        )
        .bind(kind)
        .bind(entity_id)
        .bind(user_id)
        .fetch_optional(tx)
        .await?;

        Ok(deleted.is_some())
    }
}

#[async_trait]
impl VoteRepositoryTrait for VoteRepository {
    async fn exists(&self, kind: VoteKind, entity_id: i64, user_id: i64) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM votes
                WHERE entity_kind = $1 AND entity_id = $2 AND user_id = $3
            )
            "#,
        )
        .bind(kind)
        .bind(entity_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_voter_ids(&self, kind: VoteKind, entity_id: i64) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT user_id FROM votes
            WHERE entity_kind = $1 AND entity_id = $2
            "#,
        )
        .bind(kind)
        .bind(entity_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }

    async fn list_voted_entity_ids(&self, user_id: i64, kind: VoteKind) -> Result<Vec<i64>> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT entity_id FROM votes
            WHERE user_id = $1 AND entity_kind = $2
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
