//! 跨实体投票列表的行模型
//!
//! 四种实体类型的异构表结构在 SQL 中被归一化为统一的投影行，
//! 此处定义对应的 Rust 模型。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单一类型的实体投影
///
/// get_voted 返回的行：实体的反范式化展示字段。
/// 哨兵约定：项目无自然 ref，取 -1；无指派人时 assigned_to 为 -1。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EntityProjection {
    pub id: i64,
    #[sqlx(rename = "ref")]
    #[serde(rename = "ref")]
    pub entity_ref: i64,
    /// 项目的 slug；其它类型为空字符串
    pub slug: String,
    /// 标题（项目取 name，其余取 subject）
    pub subject: String,
    pub tags: Vec<String>,
    /// 所属项目 ID（项目类型指向自身）
    pub project_id: i64,
    /// 指派人 ID，无指派人时为 -1
    pub assigned_to: i64,
    /// 关注人数
    pub total_watchers: i64,
}

/// 跨实体投票列表的一行
///
/// 由单条计划查询产出：实体投影 + 投票时间 + 所属项目展示字段
/// + 指派人展示字段 + 总票数。指派人展示字段在无指派人时为 None。
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VotedItemRow {
    /// 实体类型标签
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    #[sqlx(rename = "ref")]
    #[serde(rename = "ref")]
    pub entity_ref: i64,
    pub slug: String,
    pub subject: String,
    pub tags: Vec<String>,
    pub project_id: i64,
    pub assigned_to: i64,
    pub total_watchers: i64,
    /// 投票创建时间（列表按此升序）
    pub created_at: DateTime<Utc>,
    pub project_name: String,
    pub project_slug: String,
    pub project_is_private: bool,
    pub assigned_to_username: Option<String>,
    pub assigned_to_full_name: Option<String>,
    pub assigned_to_photo: Option<String>,
    pub assigned_to_email: Option<String>,
    /// 该实体当前总票数
    pub total_votes: i32,
}
