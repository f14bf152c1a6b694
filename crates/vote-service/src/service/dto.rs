//! 服务层输出 DTO
//!
//! 仓储层的行结构贴近 SQL 列；对外的 DTO 在这里补齐展示语义：
//! 头像回退到 Gravatar、查看者相对标志（voting/watching）等。

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::models::{User, VoteKind, VotedItemRow};

/// 头像缺省时回退到 Gravatar
///
/// 邮箱按 Gravatar 规范 trim + 小写后取摘要
pub(crate) fn photo_or_gravatar_url(photo: &str, email: &str) -> String {
    if !photo.is_empty() {
        return photo.to_string();
    }

    let normalized = email.trim().to_lowercase();
    let digest = Sha256::digest(normalized.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    format!("https://www.gravatar.com/avatar/{}", hex)
}

/// 投票人展示信息
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VoterDto {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub photo: String,
}

impl From<User> for VoterDto {
    fn from(user: User) -> Self {
        let photo = photo_or_gravatar_url(&user.photo, &user.email);
        Self {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            photo,
        }
    }
}

/// 投票列表条目
///
/// 在行结构之上叠加查看者相对的 voting / watching 标志
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VotedItemDto {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: i64,
    #[serde(rename = "ref")]
    pub entity_ref: i64,
    pub slug: String,
    pub subject: String,
    pub tags: Vec<String>,
    pub project_id: i64,
    pub project_name: String,
    pub project_slug: String,
    pub project_is_private: bool,
    pub assigned_to: i64,
    pub assigned_to_username: Option<String>,
    pub assigned_to_full_name: Option<String>,
    pub assigned_to_photo: Option<String>,
    pub total_watchers: i64,
    pub total_votes: i32,
    pub is_voter: bool,
    pub is_watcher: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl VotedItemDto {
    /// 由列表行与查看者的投票/关注集合组装条目
    ///
    /// 匿名查看者传空集合即可，两个标志恒为 false
    pub fn from_row(
        row: VotedItemRow,
        voted: &HashSet<(VoteKind, i64)>,
        watched: &HashSet<(VoteKind, i64)>,
    ) -> Self {
        let key = VoteKind::parse(&row.kind).map(|kind| (kind, row.id));
        let is_voter = key.map(|k| voted.contains(&k)).unwrap_or(false);
        let is_watcher = key.map(|k| watched.contains(&k)).unwrap_or(false);

        let assigned_to_photo = match (&row.assigned_to_username, &row.assigned_to_email) {
            (Some(_), Some(email)) => Some(photo_or_gravatar_url(
                row.assigned_to_photo.as_deref().unwrap_or(""),
                email,
            )),
            _ => None,
        };

        Self {
            kind: row.kind,
            id: row.id,
            entity_ref: row.entity_ref,
            slug: row.slug,
            subject: row.subject,
            tags: row.tags,
            project_id: row.project_id,
            project_name: row.project_name,
            project_slug: row.project_slug,
            project_is_private: row.project_is_private,
            assigned_to: row.assigned_to,
            assigned_to_username: row.assigned_to_username,
            assigned_to_full_name: row.assigned_to_full_name,
            assigned_to_photo,
            total_watchers: row.total_watchers,
            total_votes: row.total_votes,
            is_voter,
            is_watcher,
            created_at: row.created_at,
        }
    }
}
