//! 投票读路径服务
//!
//! 单实体维度的查询：票数、投票人、某用户是否投过票、
//! 某用户投过票的实体。列表页的跨实体查询在 voted_list_service。

use std::sync::Arc;

use tracing::instrument;

use crate::error::Result;
use crate::models::{EntityProjection, VoteKind};
use crate::repository::{
    EntityRepositoryTrait, UserRepositoryTrait, VoteCountRepositoryTrait, VoteRepositoryTrait,
};
use crate::service::dto::VoterDto;

/// 投票读路径服务
pub struct VoteQueryService<VR, CR, UR, ER>
where
    VR: VoteRepositoryTrait,
    CR: VoteCountRepositoryTrait,
    UR: UserRepositoryTrait,
    ER: EntityRepositoryTrait,
{
    vote_repo: Arc<VR>,
    count_repo: Arc<CR>,
    user_repo: Arc<UR>,
    entity_repo: Arc<ER>,
}

impl<VR, CR, UR, ER> VoteQueryService<VR, CR, UR, ER>
where
    VR: VoteRepositoryTrait,
    CR: VoteCountRepositoryTrait,
    UR: UserRepositoryTrait,
    ER: EntityRepositoryTrait,
{
    pub fn new(
        vote_repo: Arc<VR>,
        count_repo: Arc<CR>,
        user_repo: Arc<UR>,
        entity_repo: Arc<ER>,
    ) -> Self {
        Self {
            vote_repo,
            count_repo,
            user_repo,
            entity_repo,
        }
    }

    /// 查询实体当前票数，从未被投票的实体返回 0
    #[instrument(skip(self))]
    pub async fn get_votes(&self, kind: VoteKind, entity_id: i64) -> Result<i32> {
        self.count_repo.get(kind, entity_id).await
    }

    /// 查询实体的投票人列表
    #[instrument(skip(self))]
    pub async fn get_voters(&self, kind: VoteKind, entity_id: i64) -> Result<Vec<VoterDto>> {
        let users = self.user_repo.list_voters(kind, entity_id).await?;
        Ok(users.into_iter().map(VoterDto::from).collect())
    }

    /// 按 ID 批量解析用户展示信息，未知 ID 静默跳过
    #[instrument(skip(self))]
    pub async fn resolve_users(&self, ids: &[i64]) -> Result<Vec<VoterDto>> {
        let users = self.user_repo.get_users_by_ids(ids).await?;
        Ok(users.into_iter().map(VoterDto::from).collect())
    }

    /// 查询某用户是否已对实体投票
    #[instrument(skip(self))]
    pub async fn is_voted(&self, kind: VoteKind, entity_id: i64, user_id: i64) -> Result<bool> {
        self.vote_repo.exists(kind, entity_id, user_id).await
    }

    /// 查询实体的投票人 ID 集合
    #[instrument(skip(self))]
    pub async fn get_voter_ids(&self, kind: VoteKind, entity_id: i64) -> Result<Vec<i64>> {
        self.vote_repo.list_voter_ids(kind, entity_id).await
    }

    /// 查询某用户在指定类型下投过票的实体 ID
    #[instrument(skip(self))]
    pub async fn get_voted_entity_ids(&self, user_id: i64, kind: VoteKind) -> Result<Vec<i64>> {
        self.vote_repo.list_voted_entity_ids(user_id, kind).await
    }

    /// 查询某用户在指定类型下投过票的实体投影，按投票时间升序
    #[instrument(skip(self))]
    pub async fn get_voted(
        &self,
        user_id: i64,
        kind: VoteKind,
    ) -> Result<Vec<EntityProjection>> {
        self.entity_repo.list_voted_projections(user_id, kind).await
    }
}
