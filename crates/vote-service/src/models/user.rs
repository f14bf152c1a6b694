//! 用户目录只读投影
//!
//! 投票服务只消费用户的展示字段，不负责用户的增删改。

use serde::{Deserialize, Serialize};

/// 用户展示投影
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    /// 头像 URL，未设置时为空字符串
    pub photo: String,
    pub email: String,
}
