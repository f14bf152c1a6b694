//! VotedListService 集成测试
//!
//! 使用真实 PostgreSQL 验证跨实体投票列表的可见性过滤、
//! 过滤参数与查看者相对标志。列表查询依赖 UNION 投影与
//! array_cat 权限判断，无法通过纯 mock 覆盖。
//!
//! ## 运行方式
//!
//! ```bash
//! DATABASE_URL=postgres://... cargo test --test voted_list_test -- --ignored
//! ```

use std::sync::Arc;

use sqlx::PgPool;
use vote_service::models::VoteKind;
use vote_service::repository::VotedListRepository;
use vote_service::service::{VotedListService, VotingService};

// ==================== 辅助函数 ====================

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

fn list_service(pool: &PgPool) -> VotedListService<VotedListRepository> {
    VotedListService::new(Arc::new(VotedListRepository::new(pool.clone())))
}

async fn seed_user(pool: &PgPool, user_id: i64, username: &str) {
    sqlx::query(
        r#"
        INSERT INTO users (id, username, full_name, email)
        VALUES ($1, $2, $2, $2 || '@example.com')
        ON CONFLICT (id) DO UPDATE SET username = EXCLUDED.username
        "#,
    )
    .bind(user_id)
    .bind(username)
    .execute(pool)
    .await
    .expect("插入测试用户失败");
}

/// 插入测试项目，可指定隐私与匿名权限
async fn seed_project(
    pool: &PgPool,
    project_id: i64,
    slug: &str,
    is_private: bool,
    anon_permissions: &[&str],
) {
    let anon: Vec<String> = anon_permissions.iter().map(|p| p.to_string()).collect();
    sqlx::query(
        r#"
        INSERT INTO projects (id, name, slug, is_private, anon_permissions)
        VALUES ($1, $2, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE SET
            is_private = EXCLUDED.is_private,
            anon_permissions = EXCLUDED.anon_permissions
        "#,
    )
    .bind(project_id)
    .bind(slug)
    .bind(is_private)
    .bind(&anon)
    .execute(pool)
    .await
    .expect("插入测试项目失败");
}

/// 插入带指定权限的角色并把用户加入项目
async fn seed_membership(
    pool: &PgPool,
    project_id: i64,
    user_id: i64,
    role_id: i64,
    permissions: &[&str],
) {
    let perms: Vec<String> = permissions.iter().map(|p| p.to_string()).collect();
    sqlx::query(
        r#"
        INSERT INTO project_roles (id, project_id, name, permissions)
        VALUES ($1, $2, 'IntegTest Role', $3)
        ON CONFLICT (id) DO UPDATE SET permissions = EXCLUDED.permissions
        "#,
    )
    .bind(role_id)
    .bind(project_id)
    .bind(&perms)
    .execute(pool)
    .await
    .expect("插入测试角色失败");

    sqlx::query(
        r#"
        INSERT INTO project_memberships (project_id, user_id, role_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (project_id, user_id) DO UPDATE SET role_id = EXCLUDED.role_id
        "#,
    )
    .bind(project_id)
    .bind(user_id)
    .bind(role_id)
    .execute(pool)
    .await
    .expect("插入测试成员关系失败");
}

async fn seed_user_story(
    pool: &PgPool,
    story_id: i64,
    project_id: i64,
    subject: &str,
    assigned_to: Option<i64>,
) {
    sqlx::query(
        r#"
        INSERT INTO user_stories (id, ref, subject, project_id, assigned_to_id)
        VALUES ($1, $1, $2, $3, $4)
        ON CONFLICT (id) DO UPDATE SET
            subject = EXCLUDED.subject,
            assigned_to_id = EXCLUDED.assigned_to_id
        "#,
    )
    .bind(story_id)
    .bind(subject)
    .bind(project_id)
    .bind(assigned_to)
    .execute(pool)
    .await
    .expect("插入测试用户故事失败");
}

/// 把用户加入用户故事的关注列表
async fn seed_story_watcher(pool: &PgPool, story_id: i64, user_id: i64) {
    sqlx::query(
        r#"
        INSERT INTO user_story_watchers (user_story_id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (user_story_id, user_id) DO NOTHING
        "#,
    )
    .bind(story_id)
    .bind(user_id)
    .execute(pool)
    .await
    .expect("插入测试关注失败");
}

/// 清理指定用户的全部投票与计数
async fn cleanup_user_votes(pool: &PgPool, user_ids: &[i64]) {
    for uid in user_ids {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT entity_kind, entity_id FROM votes WHERE user_id = $1",
        )
        .bind(uid)
        .fetch_all(pool)
        .await
        .unwrap_or_default();

        sqlx::query("DELETE FROM votes WHERE user_id = $1")
            .bind(uid)
            .execute(pool)
            .await
            .ok();

        for (kind, eid) in rows {
            sqlx::query("DELETE FROM vote_counts WHERE entity_kind = $1 AND entity_id = $2")
                .bind(kind)
                .bind(eid)
                .execute(pool)
                .await
                .ok();
        }
    }
}

// ==================== 测试用例 ====================

/// 公开项目：投项目 + 投故事后，匿名查看者能看到两行，
/// 项目行带 -1 哨兵值与 slug，故事行 slug 为空
#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_public_project_visible_to_anonymous() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let (project_id, story_id, voter_id) = (99920, 99920, 99920);

    seed_user(&pool, voter_id, "integ_list_public").await;
    seed_project(&pool, project_id, "integ-list-public", false, &[]).await;
    seed_user_story(&pool, story_id, project_id, "Public story", None).await;
    cleanup_user_votes(&pool, &[voter_id]).await;

    let voting = VotingService::new(pool.clone());
    voting
        .add_vote(VoteKind::Project, project_id, voter_id)
        .await
        .unwrap();
    voting
        .add_vote(VoteKind::UserStory, story_id, voter_id)
        .await
        .unwrap();

    let items = list_service(&pool)
        .get_voted_list(voter_id, None, None, None)
        .await
        .unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.total_votes == 1));
    // 按投票时间升序：先投的项目在前
    assert_eq!(items[0].kind, "project");
    assert_eq!(items[1].kind, "userstory");

    let project_row = &items[0];
    assert_eq!(project_row.entity_ref, -1);
    assert_eq!(project_row.assigned_to, -1);
    assert_eq!(project_row.slug, "integ-list-public");

    let story_row = &items[1];
    assert_eq!(story_row.slug, "");
    assert_eq!(story_row.entity_ref, story_id);
    assert_eq!(story_row.project_slug, "integ-list-public");

    // 匿名查看者的相对标志恒为 false
    assert!(items.iter().all(|i| !i.is_voter && !i.is_watcher));

    cleanup_user_votes(&pool, &[voter_id]).await;
}

/// 私有项目：有查看权限的成员可见，无关用户与匿名不可见
#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_private_project_requires_permission() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let (project_id, story_id) = (99921, 99921);
    let (voter_id, member_id, stranger_id) = (99921, 99922, 99923);

    seed_user(&pool, voter_id, "integ_list_voter").await;
    seed_user(&pool, member_id, "integ_list_member").await;
    seed_user(&pool, stranger_id, "integ_list_stranger").await;
    seed_project(&pool, project_id, "integ-list-private", true, &[]).await;
    seed_membership(&pool, project_id, member_id, 99921, &["view_us"]).await;
    seed_user_story(&pool, story_id, project_id, "Private story", None).await;
    cleanup_user_votes(&pool, &[voter_id]).await;

    VotingService::new(pool.clone())
        .add_vote(VoteKind::UserStory, story_id, voter_id)
        .await
        .unwrap();

    let svc = list_service(&pool);

    let for_member = svc
        .get_voted_list(voter_id, Some(member_id), None, None)
        .await
        .unwrap();
    assert_eq!(for_member.len(), 1);
    assert!(for_member[0].project_is_private);

    let for_stranger = svc
        .get_voted_list(voter_id, Some(stranger_id), None, None)
        .await
        .unwrap();
    assert!(for_stranger.is_empty());

    let for_anonymous = svc
        .get_voted_list(voter_id, None, None, None)
        .await
        .unwrap();
    assert!(for_anonymous.is_empty());

    cleanup_user_votes(&pool, &[voter_id]).await;
}

/// 私有项目 + 匿名权限：匿名查看者也能看到
#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_private_project_anon_permissions() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let (project_id, story_id, voter_id) = (99924, 99924, 99924);

    seed_user(&pool, voter_id, "integ_list_anonperm").await;
    seed_project(&pool, project_id, "integ-list-anonperm", true, &["view_us"]).await;
    seed_user_story(&pool, story_id, project_id, "Anon visible story", None).await;
    cleanup_user_votes(&pool, &[voter_id]).await;

    VotingService::new(pool.clone())
        .add_vote(VoteKind::UserStory, story_id, voter_id)
        .await
        .unwrap();

    let items = list_service(&pool)
        .get_voted_list(voter_id, None, None, None)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].kind, "userstory");

    cleanup_user_votes(&pool, &[voter_id]).await;
}

/// 类型过滤：合法类型只保留该类型，未知类型返回空列表
#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_kind_filter() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let (project_id, story_id, voter_id) = (99925, 99925, 99925);

    seed_user(&pool, voter_id, "integ_list_kind").await;
    seed_project(&pool, project_id, "integ-list-kind", false, &[]).await;
    seed_user_story(&pool, story_id, project_id, "Kind filter story", None).await;
    cleanup_user_votes(&pool, &[voter_id]).await;

    let voting = VotingService::new(pool.clone());
    voting
        .add_vote(VoteKind::Project, project_id, voter_id)
        .await
        .unwrap();
    voting
        .add_vote(VoteKind::UserStory, story_id, voter_id)
        .await
        .unwrap();

    let svc = list_service(&pool);

    let stories = svc
        .get_voted_list(voter_id, None, Some("userstory"), None)
        .await
        .unwrap();
    assert_eq!(stories.len(), 1);
    assert_eq!(stories[0].kind, "userstory");

    let unknown = svc
        .get_voted_list(voter_id, None, Some("epic"), None)
        .await
        .unwrap();
    assert!(unknown.is_empty());

    cleanup_user_votes(&pool, &[voter_id]).await;
}

/// 全文过滤：按 subject 匹配检索词
#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_text_query_filter() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let (project_id, voter_id) = (99926, 99926);
    let story_ids = [99926_i64, 99927];

    seed_user(&pool, voter_id, "integ_list_query").await;
    seed_project(&pool, project_id, "integ-list-query", false, &[]).await;
    seed_user_story(&pool, story_ids[0], project_id, "Export monthly report", None).await;
    seed_user_story(&pool, story_ids[1], project_id, "Fix login timeout", None).await;
    cleanup_user_votes(&pool, &[voter_id]).await;

    let voting = VotingService::new(pool.clone());
    for sid in story_ids {
        voting
            .add_vote(VoteKind::UserStory, sid, voter_id)
            .await
            .unwrap();
    }

    let items = list_service(&pool)
        .get_voted_list(voter_id, None, None, Some("report"))
        .await
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, story_ids[0]);

    cleanup_user_votes(&pool, &[voter_id]).await;
}

/// 查看者相对标志与指派人展示字段
#[tokio::test]
#[ignore = "需要 PostgreSQL"]
async fn test_viewer_flags_and_assignee_fields() {
    let pool = PgPool::connect(&database_url()).await.unwrap();
    let (project_id, story_id) = (99928, 99928);
    let (voter_id, viewer_id, assignee_id) = (99928, 99929, 99930);

    seed_user(&pool, voter_id, "integ_list_flags_voter").await;
    seed_user(&pool, viewer_id, "integ_list_flags_viewer").await;
    seed_user(&pool, assignee_id, "integ_list_flags_assignee").await;
    seed_project(&pool, project_id, "integ-list-flags", false, &[]).await;
    seed_user_story(
        &pool,
        story_id,
        project_id,
        "Flagged story",
        Some(assignee_id),
    )
    .await;
    seed_story_watcher(&pool, story_id, viewer_id).await;
    cleanup_user_votes(&pool, &[voter_id, viewer_id]).await;

    let voting = VotingService::new(pool.clone());
    voting
        .add_vote(VoteKind::UserStory, story_id, voter_id)
        .await
        .unwrap();
    // 查看者也投了票，对应 is_voter = true
    voting
        .add_vote(VoteKind::UserStory, story_id, viewer_id)
        .await
        .unwrap();

    let items = list_service(&pool)
        .get_voted_list(voter_id, Some(viewer_id), None, None)
        .await
        .unwrap();
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item.total_votes, 2);
    assert_eq!(item.total_watchers, 1);
    assert!(item.is_voter);
    assert!(item.is_watcher);
    assert_eq!(item.assigned_to, assignee_id);
    assert_eq!(
        item.assigned_to_username.as_deref(),
        Some("integ_list_flags_assignee")
    );
    assert!(item
        .assigned_to_photo
        .as_deref()
        .unwrap()
        .contains("gravatar.com"));

    cleanup_user_votes(&pool, &[voter_id, viewer_id]).await;
}
