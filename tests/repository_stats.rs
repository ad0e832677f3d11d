use nimiq_link::domain::entities::NewLink;
use nimiq_link::domain::repositories::{LinkRepository, StatsRepository};
use nimiq_link::infrastructure::persistence::{PgLinkRepository, PgStatsRepository};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

async fn create_test_link(pool: &PgPool) -> Uuid {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    let link = repo
        .create(NewLink {
            id: Uuid::new_v4(),
            destination: "https://example.com".to_string(),
            domain: "a.tld".to_string(),
            slug: "abc123".to_string(),
            admin_password_hash: "hash".to_string(),
        })
        .await
        .unwrap();
    link.id
}

async fn insert_clicks(pool: &PgPool, link_id: Uuid, days_ago: i32, clicks: i32) {
    sqlx::query(
        "INSERT INTO clicks (link_id, date, clicks) VALUES ($1, CURRENT_DATE - $2::int, $3)",
    )
    .bind(link_id)
    .bind(days_ago)
    .bind(clicks)
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test]
async fn test_record_click_upserts(pool: PgPool) {
    let link_id = create_test_link(&pool).await;
    let repo = PgStatsRepository::new(Arc::new(pool));

    repo.record_click(link_id).await.unwrap();
    repo.record_click(link_id).await.unwrap();

    let days = repo.recent_clicks(link_id, 7).await.unwrap();
    assert_eq!(days.len(), 1);
    assert_eq!(days[0].clicks, 2);
    assert_eq!(days[0].date, chrono::Utc::now().date_naive());
}

#[sqlx::test]
async fn test_concurrent_clicks_are_not_lost(pool: PgPool) {
    let link_id = create_test_link(&pool).await;
    let repo = Arc::new(PgStatsRepository::new(Arc::new(pool)));

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move { repo.record_click(link_id).await.unwrap() })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let days = repo.recent_clicks(link_id, 7).await.unwrap();
    assert_eq!(days[0].clicks, 20);
}

#[sqlx::test]
async fn test_recent_clicks_window(pool: PgPool) {
    let link_id = create_test_link(&pool).await;
    insert_clicks(&pool, link_id, 0, 1).await;
    insert_clicks(&pool, link_id, 6, 3).await;
    insert_clicks(&pool, link_id, 7, 5).await;
    insert_clicks(&pool, link_id, 20, 8).await;
    let repo = PgStatsRepository::new(Arc::new(pool));

    let days = repo.recent_clicks(link_id, 7).await.unwrap();

    let counts: Vec<i32> = days.iter().map(|d| d.clicks).collect();
    assert_eq!(counts, vec![3, 1]);
    assert!(days[0].date < days[1].date);
}

#[sqlx::test]
async fn test_recent_clicks_unknown_link(pool: PgPool) {
    let repo = PgStatsRepository::new(Arc::new(pool));
    assert!(repo.recent_clicks(Uuid::new_v4(), 7).await.unwrap().is_empty());
}
