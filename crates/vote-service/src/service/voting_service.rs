//! 投票写路径服务
//!
//! 投票与撤票都是幂等操作：重复投票、撤销不存在的投票均不报错，
//! 只是不产生任何变化。每次变更在单个事务内同时落 votes 行与
//! vote_counts 计数，保证两者始终一致。

use sqlx::PgPool;
use tracing::{info, instrument};

use crate::error::Result;
use crate::models::{Vote, VoteKind};
use crate::repository::{VoteCountRepository, VoteRepository};

/// 投票写路径服务
///
/// 直接持有连接池，在自己的事务里调用仓储的事务内关联函数
pub struct VotingService {
    pool: PgPool,
}

impl VotingService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 投票
    ///
    /// 幂等：该用户已投过票时返回 `Ok(None)`，计数不变。
    /// 新投票返回创建的 Vote，并在同一事务内把计数 +1
    #[instrument(skip(self))]
    pub async fn add_vote(
        &self,
        kind: VoteKind,
        entity_id: i64,
        user_id: i64,
    ) -> Result<Option<Vote>> {
        let mut tx = self.pool.begin().await?;

        let created =
            VoteRepository::try_create_in_tx(&mut tx, kind, entity_id, user_id).await?;

        let Some(vote) = created else {
            // 已投过票，放弃事务即可
            tx.rollback().await?;
            return Ok(None);
        };

        VoteCountRepository::increment_in_tx(&mut tx, kind, entity_id).await?;
        tx.commit().await?;

        info!(
            kind = %kind,
            entity_id,
            user_id,
            vote_id = vote.id,
            "投票成功"
        );
        Ok(Some(vote))
    }

    /// 撤票
    ///
    /// 幂等：该用户本就没有投票时返回 `Ok(false)`，计数不变。
    /// 删除成功返回 `true`，并在同一事务内把计数 -1
    #[instrument(skip(self))]
    pub async fn remove_vote(&self, kind: VoteKind, entity_id: i64, user_id: i64) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted = VoteRepository::delete_in_tx(&mut tx, kind, entity_id, user_id).await?;
        if !deleted {
            tx.rollback().await?;
            return Ok(false);
        }

        VoteCountRepository::decrement_in_tx(&mut tx, kind, entity_id).await?;
        tx.commit().await?;

        info!(kind = %kind, entity_id, user_id, "撤票成功");
        Ok(true)
    }
}
