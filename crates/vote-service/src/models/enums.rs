//! 投票服务枚举类型定义
//!
//! 所有枚举都支持数据库（sqlx）和 JSON（serde）序列化

use serde::{Deserialize, Serialize};

/// 可投票实体类型
///
/// 封闭的多态判别式：投票记录和计数器都通过 (类型, ID) 二元组弱引用
/// 任意实体，不持有实体本身。新增类型时在此处和投影注册表各加一项即可。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
pub enum VoteKind {
    /// 项目
    Project,
    /// 用户故事
    UserStory,
    /// 任务
    Task,
    /// 缺陷/议题
    Issue,
}

impl VoteKind {
    /// 全部已注册的实体类型，投影查询按此迭代
    pub const ALL: [VoteKind; 4] = [
        VoteKind::Project,
        VoteKind::UserStory,
        VoteKind::Task,
        VoteKind::Issue,
    ];

    /// 类型标签（数据库与 API 中的表示）
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::UserStory => "userstory",
            Self::Task => "task",
            Self::Issue => "issue",
        }
    }

    /// 从类型标签解析
    ///
    /// 未知标签返回 None 而非错误：查询路径下未知类型意味着空结果
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "project" => Some(Self::Project),
            "userstory" => Some(Self::UserStory),
            "task" => Some(Self::Task),
            "issue" => Some(Self::Issue),
            _ => None,
        }
    }

    /// 该类型对应的查看权限名
    ///
    /// 私有项目下，查看者的角色权限或项目匿名权限需包含此权限
    /// 对应类型的行才可见
    pub fn view_permission(&self) -> &'static str {
        match self {
            Self::Project => "view_project",
            Self::UserStory => "view_us",
            Self::Task => "view_tasks",
            Self::Issue => "view_issues",
        }
    }
}

impl std::fmt::Display for VoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
