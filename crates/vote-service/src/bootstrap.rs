//! 服务装配
//!
//! 从配置到可用服务实例的统一入口：加载配置、初始化日志、
//! 建立数据库连接池，并装配好全部读写服务。嵌入方（API 层、
//! 后台任务等）只需要持有 ServiceContext。

use std::sync::Arc;

use backlog_shared::config::AppConfig;
use backlog_shared::database::Database;
use backlog_shared::error::Result;
use backlog_shared::observability;
use tracing::{info, warn};

use crate::repository::{
    EntityRepository, UserRepository, VoteCountRepository, VoteRepository, VotedListRepository,
};
use crate::service::{VoteQueryService, VotedListService, VotingService};

const SERVICE_NAME: &str = "vote-service";

/// 装配完成的投票服务上下文
pub struct ServiceContext {
    pub db: Database,
    pub voting: VotingService,
    pub queries:
        VoteQueryService<VoteRepository, VoteCountRepository, UserRepository, EntityRepository>,
    pub voted_list: VotedListService<VotedListRepository>,
}

impl ServiceContext {
    /// 加载配置并装配服务
    ///
    /// 日志初始化失败只告警不中断，嵌入方可能已经设置过全局 subscriber
    pub async fn init() -> Result<Self> {
        let config = AppConfig::load(SERVICE_NAME)?;

        if observability::tracing::init(&config.observability).is_err() {
            warn!("日志已初始化，跳过重复初始化");
        }

        info!(
            service = SERVICE_NAME,
            environment = %config.environment,
            "投票服务启动"
        );

        let db = Database::connect(&config.database).await?;
        Ok(Self::with_database(db))
    }

    /// 用已有连接池装配服务（测试或嵌入方复用连接池时使用）
    pub fn with_database(db: Database) -> Self {
        let pool = db.pool().clone();

        let voting = VotingService::new(pool.clone());
        let queries = VoteQueryService::new(
            Arc::new(VoteRepository::new(pool.clone())),
            Arc::new(VoteCountRepository::new(pool.clone())),
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(EntityRepository::new(pool.clone())),
        );
        let voted_list = VotedListService::new(Arc::new(VotedListRepository::new(pool)));

        Self {
            db,
            voting,
            queries,
            voted_list,
        }
    }
}
