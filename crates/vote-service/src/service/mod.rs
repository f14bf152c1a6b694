//! 业务服务层
//!
//! 写路径（VotingService）直接持有连接池，在事务内组合仓储的
//! 事务内函数；读路径以 trait 泛型注入仓储，便于 mock 测试。

pub mod dto;
mod query_service;
mod voted_list_service;
mod voting_service;

pub use dto::{VotedItemDto, VoterDto};
pub use query_service::VoteQueryService;
pub use voted_list_service::VotedListService;
pub use voting_service::VotingService;
