//! 票数计数器仓储
//!
//! 维护 vote_counts 表的反范式化票数。增减都是原子的 upsert，必须与
//! 对应的成员关系变更处于同一事务内（由 VotingService 保证）。

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use super::traits::VoteCountRepositoryTrait;
use crate::error::Result;
use crate::models::VoteKind;

/// 票数计数器仓储
pub struct VoteCountRepository {
    pool: PgPool,
}

impl VoteCountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ==================== 事务操作 ====================

    /// 在事务中增加计数：无记录时创建为 1，否则原子加 1
    pub async fn increment_in_tx(
        tx: &mut PgConnection,
        kind: VoteKind,
        entity_id: i64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vote_counts (entity_kind, entity_id, count)
            VALUES ($1, $2, 1)
            ON CONFLICT (entity_kind, entity_id)
            DO UPDATE SET count = vote_counts.count + 1
            "#,
        )
        .bind(kind)
        .bind(entity_id)
        .execute(tx)
        .await?;

        Ok(())
    }

    /// 在事务中减少计数：无记录时创建为 -1，否则原子减 1
    ///
    /// 不做零下限截断。调用方必须先确认确实删除了一条成员关系，
    /// 否则计数会被错误地减到负数。
    pub async fn decrement_in_tx(
        tx: &mut PgConnection,
        kind: VoteKind,
        entity_id: i64,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO vote_counts (entity_kind, entity_id, count)
            VALUES ($1, $2, -1)
            ON CONFLICT (entity_kind, entity_id)
            DO UPDATE SET count = vote_counts.count - 1
            "#,
        )
        .bind(kind)
        .bind(entity_id)
        .execute(tx)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl VoteCountRepositoryTrait for VoteCountRepository {
    async fn get(&self, kind: VoteKind, entity_id: i64) -> Result<i32> {
        let count = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT count FROM vote_counts
            WHERE entity_kind = $1 AND entity_id = $2
            "#,
        )
        .bind(kind)
        .bind(entity_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(count.unwrap_or(0))
    }
}
