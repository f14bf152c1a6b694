//! 投票服务
//!
//! 为项目、用户故事、任务、问题等多种实体提供统一的投票能力。
//!
//! ## 核心功能
//!
//! - **投票/撤票**：幂等的投票写路径，votes 行与 vote_counts
//!   计数在同一事务内维护
//! - **票数查询**：反范式化的票数直读，从未被投票的实体返回 0
//! - **投票人查询**：某实体的投票人列表与 ID 集合
//! - **投票列表**：跨实体类型的"某用户投过票的内容"列表，
//!   按查看者身份做项目隐私 + 角色权限 + 匿名权限过滤
//!
//! ## 模块结构
//!
//! - `models`: 领域模型定义
//! - `error`: 错误类型定义
//! - `repository`: 数据库仓储层
//! - `service`: 业务服务层
//! - `bootstrap`: 配置加载与服务装配

pub mod bootstrap;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;

pub use bootstrap::ServiceContext;
pub use error::{Result, VoteError};
pub use models::*;
pub use repository::{
    EntityRepository, UserRepository, VoteCountRepository, VoteRepository, VotedListRepository,
};
pub use service::{VoteQueryService, VotedItemDto, VotedListService, VoterDto, VotingService, dto};
