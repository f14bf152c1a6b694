//! 仓储 Trait 定义
//!
//! 定义仓储接口，便于服务层依赖抽象而非具体实现，支持 mock 测试。
//! 事务内的写入操作（创建/删除投票、计数增减）定义在具体仓储类型的
//! 关联函数上，由 VotingService 在单个事务中编排。

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{EntityProjection, User, VoteKind, VotedItemRow};

/// 投票成员关系仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteRepositoryTrait: Send + Sync {
    /// 某用户是否已对某实体投票
    async fn exists(&self, kind: VoteKind, entity_id: i64, user_id: i64) -> Result<bool>;

    /// 某实体的投票用户 ID（顺序不保证）
    async fn list_voter_ids(&self, kind: VoteKind, entity_id: i64) -> Result<Vec<i64>>;

    /// 某用户投过票的某类型实体 ID（顺序不保证）
    async fn list_voted_entity_ids(&self, user_id: i64, kind: VoteKind) -> Result<Vec<i64>>;
}

/// 票数计数器仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VoteCountRepositoryTrait: Send + Sync {
    /// 获取某实体的当前票数，无记录时返回 0
    async fn get(&self, kind: VoteKind, entity_id: i64) -> Result<i32>;
}

/// 用户目录仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    async fn get_users_by_ids(&self, ids: &[i64]) -> Result<Vec<User>>;

    /// 某实体的全部投票用户（单次连接查询）
    async fn list_voters(&self, kind: VoteKind, entity_id: i64) -> Result<Vec<User>>;
}

/// 实体投影仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityRepositoryTrait: Send + Sync {
    /// 某用户投过票的某类型实体投影，按投票时间升序
    async fn list_voted_projections(
        &self,
        user_id: i64,
        kind: VoteKind,
    ) -> Result<Vec<EntityProjection>>;
}

/// 跨实体投票列表仓储接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VotedListRepositoryTrait: Send + Sync {
    /// 权限过滤后的投票列表（单条计划查询）
    ///
    /// for_user 为被查看的投票人；from_user 为查看者，None 表示匿名。
    /// kind/q 为可选过滤器，以绑定参数传入。
    async fn list_voted(
        &self,
        for_user: i64,
        from_user: Option<i64>,
        kind: Option<VoteKind>,
        q: Option<String>,
    ) -> Result<Vec<VotedItemRow>>;

    /// 某用户投过票的全部 (类型, 实体 ID) 集合
    async fn user_voted_ids(&self, user_id: i64) -> Result<HashSet<(VoteKind, i64)>>;

    /// 某用户关注的全部 (类型, 实体 ID) 集合
    async fn user_watched_ids(&self, user_id: i64) -> Result<HashSet<(VoteKind, i64)>>;
}
