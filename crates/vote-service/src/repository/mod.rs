//! 数据访问层
//!
//! ## 设计原则
//!
//! 1. 读路径仓储全部以 trait 暴露，测试用 mockall 自动生成 mock
//! 2. 写路径（投票/撤票 + 计数维护）以事务内关联函数暴露，
//!    由服务层在同一个事务里按序调用
//! 3. SQL 全部参数绑定，动态片段只来自类型注册表
//! 4. 仓储只做数据访问，幂等与可见性语义在服务层组合

mod count_repo;
mod entity_repo;
mod projections;
mod traits;
mod user_repo;
mod vote_repo;
mod voted_list_repo;

pub use count_repo::VoteCountRepository;
pub use entity_repo::EntityRepository;
pub use traits::{
    EntityRepositoryTrait, UserRepositoryTrait, VoteCountRepositoryTrait, VoteRepositoryTrait,
    VotedListRepositoryTrait,
};
pub use user_repo::UserRepository;
pub use vote_repo::VoteRepository;
pub use voted_list_repo::VotedListRepository;

#[cfg(test)]
pub use traits::{
    MockEntityRepositoryTrait, MockUserRepositoryTrait, MockVoteCountRepositoryTrait,
    MockVoteRepositoryTrait, MockVotedListRepositoryTrait,
};
