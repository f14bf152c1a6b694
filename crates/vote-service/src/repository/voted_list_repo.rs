//! 跨实体投票列表仓储
//!
//! 投票列表是整个子系统里最重的读路径：要在一条计划查询内完成
//! 四种实体投影的合并、项目与指派人信息的连接、票数聚合，以及
//! 按项目隐私 + 角色权限 + 匿名权限的逐行可见性过滤。
//!
//! ## 查询结构
//!
//! 1. 投影 UNION：各类型实体归一化为统一列（注册表生成）
//! 2. LEFT JOIN 所属项目（隐私标志、匿名权限）与指派人展示字段
//! 3. INNER JOIN 投票人的 votes 行（只保留真正投过票的实体，并带出
//!    投票时间）与 vote_counts（总票数）
//! 4. LEFT JOIN 查看者在该项目的成员关系与角色（匿名查看者绑定 -1，
//!    连不上任何成员关系）
//! 5. WHERE：项目公开，或私有且该行类型的查看权限在
//!    角色权限 ∪ 匿名权限 中；可选的类型/全文过滤以可空参数绑定
//! 6. 按投票时间升序

use std::collections::HashSet;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use super::projections;
use super::traits::VotedListRepositoryTrait;
use crate::error::Result;
use crate::models::{VoteKind, VotedItemRow};

/// 匿名查看者的绑定值，成员关系连接对它必然落空
const ANONYMOUS_USER_ID: i64 = -1;

/// 跨实体投票列表仓储
pub struct VotedListRepository {
    pool: PgPool,
}

impl VotedListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// 拼装列表查询 SQL
    ///
    /// 动态部分只有注册表生成的投影与权限片段；过滤器固定为
    /// $3（类型）与 $4（全文检索词）两个可空绑定参数
    fn list_voted_sql() -> String {
        format!(
            r#"
            SELECT entities.type, entities.id, entities.ref, entities.slug,
                   entities.subject, entities.tags, entities.project_id,
                   entities.assigned_to, entities.total_watchers,
                   v.created_at,
                   p.name AS project_name, p.slug AS project_slug,
                   p.is_private AS project_is_private,
                   au.username AS assigned_to_username,
                   au.full_name AS assigned_to_full_name,
                   au.photo AS assigned_to_photo,
                   au.email AS assigned_to_email,
                   vc.count AS total_votes
              FROM ( {union} ) entities
              LEFT JOIN projects p ON entities.project_id = p.id
              LEFT JOIN users au ON entities.assigned_to = au.id
             INNER JOIN votes v
                ON v.entity_kind = entities.type AND v.entity_id = entities.id
               AND v.user_id = $1
             INNER JOIN vote_counts vc
                ON vc.entity_kind = entities.type AND vc.entity_id = entities.id
              LEFT JOIN project_memberships m
                ON m.user_id = $2 AND m.project_id = entities.project_id
              LEFT JOIN project_roles r
                ON r.project_id = entities.project_id AND r.id = m.role_id
             WHERE (
                    p.is_private = false
                    OR (p.is_private = true AND ( {permissions} ))
                   )
               AND ($3::varchar IS NULL OR entities.type = $3)
               AND ($4::text IS NULL
                    OR to_tsvector(COALESCE(entities.subject, '')) @@ plainto_tsquery($4))
             ORDER BY v.created_at
            "#,
            union = projections::entity_union_sql(),
            permissions = projections::permission_filter_sql(),
        )
    }

    /// 把 (类型标签, 实体 ID) 行收集为集合，未知标签直接丢弃
    fn collect_kind_id_pairs(rows: Vec<(String, i64)>) -> HashSet<(VoteKind, i64)> {
        rows.into_iter()
            .filter_map(|(tag, id)| VoteKind::parse(&tag).map(|kind| (kind, id)))
            .collect()
    }
}

#[async_trait]
impl VotedListRepositoryTrait for VotedListRepository {
    #[instrument(skip(self))]
    async fn list_voted(
        &self,
        for_user: i64,
        from_user: Option<i64>,
        kind: Option<VoteKind>,
        q: Option<String>,
    ) -> Result<Vec<VotedItemRow>> {
        let sql = Self::list_voted_sql();

        let rows = sqlx::query_as::<_, VotedItemRow>(&sql)
            .bind(for_user)
            .bind(from_user.unwrap_or(ANONYMOUS_USER_ID))
            .bind(kind.map(|k| k.as_str()))
            .bind(q)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn user_voted_ids(&self, user_id: i64) -> Result<HashSet<(VoteKind, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT entity_kind, entity_id FROM votes WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Self::collect_kind_id_pairs(rows))
    }

    async fn user_watched_ids(&self, user_id: i64) -> Result<HashSet<(VoteKind, i64)>> {
        let sql = projections::watched_union_sql();

        let rows = sqlx::query_as::<_, (String, i64)>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Self::collect_kind_id_pairs(rows))
    }
}
