//! 按类型注册的实体投影 SQL 片段
//!
//! 投票列表需要把四种异构实体表归一化为同一行结构。每种类型在此注册
//! 一个投影 SELECT 片段，列表查询和 get_voted 查询都从这里拼装 SQL，
//! 新增可投票类型时只需扩展 `VoteKind::ALL` 与这里的映射。
//!
//! 所有片段仅由枚举常量拼装，不包含任何用户输入；过滤条件一律走绑定
//! 参数。

use crate::models::VoteKind;

/// 实体主表名
pub(crate) fn table(kind: VoteKind) -> &'static str {
    match kind {
        VoteKind::Project => "projects",
        VoteKind::UserStory => "user_stories",
        VoteKind::Task => "tasks",
        VoteKind::Issue => "issues",
    }
}

/// 关注关系表名
pub(crate) fn watcher_table(kind: VoteKind) -> &'static str {
    match kind {
        VoteKind::Project => "project_watchers",
        VoteKind::UserStory => "user_story_watchers",
        VoteKind::Task => "task_watchers",
        VoteKind::Issue => "issue_watchers",
    }
}

/// 关注关系表中指向实体的外键列名
pub(crate) fn watcher_fk(kind: VoteKind) -> &'static str {
    match kind {
        VoteKind::Project => "project_id",
        VoteKind::UserStory => "user_story_id",
        VoteKind::Task => "task_id",
        VoteKind::Issue => "issue_id",
    }
}

/// 单一类型的投影片段
///
/// 统一列：type, id, ref, slug, subject, tags, project_id, assigned_to,
/// total_watchers。项目无自然 ref 也无指派人，取 -1 哨兵；其余类型
/// 无 slug，取空字符串，无指派人时 assigned_to 同样归一为 -1。
/// 关注人数通过分组子查询一次算出，避免逐行统计。
pub(crate) fn projection_sql(kind: VoteKind) -> String {
    let fk = watcher_fk(kind);
    match kind {
        VoteKind::Project => format!(
            "SELECT 'project' AS type, p.id, -1::bigint AS ref, p.slug, p.name AS subject, p.tags, \
                    p.id AS project_id, -1::bigint AS assigned_to, \
                    COALESCE(w.watchers, 0) AS total_watchers \
               FROM projects p \
               LEFT JOIN (SELECT {fk}, COUNT(*) AS watchers FROM project_watchers GROUP BY {fk}) w \
                 ON p.id = w.{fk}"
        ),
        _ => format!(
            "SELECT '{tag}' AS type, e.id, e.ref, '' AS slug, e.subject, e.tags, \
                    e.project_id, COALESCE(e.assigned_to_id, -1) AS assigned_to, \
                    COALESCE(w.watchers, 0) AS total_watchers \
               FROM {table} e \
               LEFT JOIN (SELECT {fk}, COUNT(*) AS watchers FROM {wtable} GROUP BY {fk}) w \
                 ON e.id = w.{fk}",
            tag = kind.as_str(),
            table = table(kind),
            wtable = watcher_table(kind),
        ),
    }
}

/// 全类型投影的 UNION
///
/// 各片段的 type 标签互不相同，UNION ALL 不会产生重复行
pub(crate) fn entity_union_sql() -> String {
    VoteKind::ALL
        .iter()
        .map(|&kind| projection_sql(kind))
        .collect::<Vec<_>>()
        .join(" UNION ALL ")
}

/// 私有项目的按类型权限过滤条件
///
/// 每种类型一个分支：该类型的查看权限出现在查看者角色权限与项目
/// 匿名权限的并集中，行才可见。别名约定：entities（投影）、r（角色）、
/// p（项目）。
pub(crate) fn permission_filter_sql() -> String {
    VoteKind::ALL
        .iter()
        .map(|kind| {
            format!(
                "(entities.type = '{tag}' AND '{perm}' = ANY (array_cat(\
                 COALESCE(r.permissions, ARRAY[]::text[]), \
                 COALESCE(p.anon_permissions, ARRAY[]::text[]))))",
                tag = kind.as_str(),
                perm = kind.view_permission(),
            )
        })
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// 用户关注实体的跨类型查询
///
/// 返回 (entity_kind, entity_id) 列，绑定参数 $1 为用户 ID
pub(crate) fn watched_union_sql() -> String {
    VoteKind::ALL
        .iter()
        .map(|&kind| {
            format!(
                "SELECT '{tag}' AS entity_kind, {fk} AS entity_id FROM {wtable} WHERE user_id = $1",
                tag = kind.as_str(),
                fk = watcher_fk(kind),
                wtable = watcher_table(kind),
            )
        })
        .collect::<Vec<_>>()
        .join(" UNION ALL ")
}
