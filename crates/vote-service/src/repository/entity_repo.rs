//! 实体投影仓储
//!
//! 把某用户投过票的某类型实体解析为统一投影行。每种类型的 SELECT
//! 片段来自投影注册表，与投票表做一次内连接，不逐实体查询。

use async_trait::async_trait;
use sqlx::PgPool;

use super::projections;
use super::traits::EntityRepositoryTrait;
use crate::error::Result;
use crate::models::{EntityProjection, VoteKind};

/// 实体投影仓储
pub struct EntityRepository {
    pool: PgPool,
}

impl EntityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntityRepositoryTrait for EntityRepository {
    async fn list_voted_projections(
        &self,
        user_id: i64,
        kind: VoteKind,
    ) -> Result<Vec<EntityProjection>> {
        let sql = format!(
            r#"
            SELECT entities.id, entities.ref, entities.slug, entities.subject,
                   entities.tags, entities.project_id, entities.assigned_to,
                   entities.total_watchers
              FROM ( {projection} ) entities
             INNER JOIN votes v
                ON v.entity_kind = $1 AND v.entity_id = entities.id AND v.user_id = $2
             ORDER BY v.created_at
            "#,
            projection = projections::projection_sql(kind),
        );

        let rows = sqlx::query_as::<_, EntityProjection>(&sql)
            .bind(kind)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
