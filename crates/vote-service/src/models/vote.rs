//! 投票相关实体定义
//!
//! 包含投票成员关系（某用户对某实体的一票）与反范式化的票数计数器

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::VoteKind;

/// 投票成员关系
///
/// 记录一个用户对一个实体的一票。(entity_kind, entity_id, user_id)
/// 三元组唯一，首次投票时创建，取消投票时删除，期间不会被修改。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vote {
    pub id: i64,
    /// 实体类型
    pub entity_kind: VoteKind,
    /// 实体 ID
    pub entity_id: i64,
    /// 投票用户 ID
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Vote {
    /// 检查是否为某用户对某实体的投票
    pub fn is_for(&self, kind: VoteKind, entity_id: i64) -> bool {
        self.entity_kind == kind && self.entity_id == entity_id
    }
}

/// 票数计数器
///
/// 每个被投票实体一行的反范式化聚合，与投票成员行在同一事务内维护。
/// 首次投票时惰性创建，归零后保留不删除。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VoteCount {
    /// 实体类型
    pub entity_kind: VoteKind,
    /// 实体 ID
    pub entity_id: i64,
    /// 当前票数
    pub count: i32,
}
