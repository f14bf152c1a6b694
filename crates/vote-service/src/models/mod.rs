//! 投票服务领域模型
//!
//! 包含投票子系统的所有核心实体定义

pub mod enums;
pub mod feed;
pub mod user;
pub mod vote;

// 重新导出常用类型
pub use enums::VoteKind;
pub use feed::{EntityProjection, VotedItemRow};
pub use user::User;
pub use vote::{Vote, VoteCount};
