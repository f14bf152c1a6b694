//! 跨实体投票列表服务
//!
//! 面向"某用户投过票的内容"页面：以查看者身份过滤可见性，
//! 再叠加查看者相对的 is_voter / is_watcher 标志。

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::error::Result;
use crate::models::VoteKind;
use crate::repository::VotedListRepositoryTrait;
use crate::service::dto::VotedItemDto;

/// 跨实体投票列表服务
pub struct VotedListService<FR>
where
    FR: VotedListRepositoryTrait,
{
    feed_repo: Arc<FR>,
}

impl<FR> VotedListService<FR>
where
    FR: VotedListRepositoryTrait,
{
    pub fn new(feed_repo: Arc<FR>) -> Self {
        Self { feed_repo }
    }

    /// 查询 `for_user` 投过票的条目，以 `from_user` 的身份过滤可见性
    ///
    /// - `from_user` 为 None 表示匿名查看者，只能看到公开项目
    ///   与匿名权限覆盖的私有项目
    /// - `kind` 为无法识别的类型标签时直接返回空列表，不查库
    /// - `q` 对 subject 做全文匹配
    #[instrument(skip(self))]
    pub async fn get_voted_list(
        &self,
        for_user: i64,
        from_user: Option<i64>,
        kind: Option<&str>,
        q: Option<&str>,
    ) -> Result<Vec<VotedItemDto>> {
        let kind_filter = match kind {
            Some(tag) => match VoteKind::parse(tag) {
                Some(parsed) => Some(parsed),
                None => {
                    debug!(tag, "未知类型过滤，返回空列表");
                    return Ok(Vec::new());
                }
            },
            None => None,
        };

        let rows = self
            .feed_repo
            .list_voted(for_user, from_user, kind_filter, q.map(str::to_string))
            .await?;
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        // 查看者相对标志只对已登录查看者有意义
        let (voted, watched) = match from_user {
            Some(viewer) => (
                self.feed_repo.user_voted_ids(viewer).await?,
                self.feed_repo.user_watched_ids(viewer).await?,
            ),
            None => (HashSet::new(), HashSet::new()),
        };

        Ok(rows
            .into_iter()
            .map(|row| VotedItemDto::from_row(row, &voted, &watched))
            .collect())
    }
}
