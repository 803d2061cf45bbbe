//! 仓库层测试（需要 PostgreSQL）
//!
//! 通过 TEST_DATABASE_URL 指定测试库，运行方式：
//! `cargo test --test repository_tests -- --ignored`

use linkvault::{
    db,
    error::AppError,
    models::user::{NewUser, Plan},
    repository::{UserRepository, UserStore},
};
use sqlx::PgPool;
use uuid::Uuid;

mod common;
use common::create_test_config;

async fn setup_test_db() -> PgPool {
    let config = create_test_config();
    let pool = db::create_pool(&config.database)
        .await
        .expect("Failed to connect to test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: Some("$argon2id$v=19$m=1024,t=1,p=1$c2FsdA$aGFzaA".to_string()),
        name: Some("Test User".to_string()),
        plan: Plan::Free,
        email_verified: false,
    }
}

fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

#[tokio::test]
#[ignore]
async fn test_user_repository_create_and_find() {
    let repo = UserRepository::new(setup_test_db().await);
    let email = unique_email("create");

    let created = repo.create(new_user(&email)).await.unwrap();
    assert_eq!(created.email, email);
    assert_eq!(created.plan, Plan::Free);
    assert!(created.last_login_at.is_none());

    let by_email = repo
        .find_by_email(&email)
        .await
        .unwrap()
        .expect("User not found");
    assert_eq!(by_email.id, created.id);

    let by_id = repo
        .find_by_id(created.id)
        .await
        .unwrap()
        .expect("User not found");
    assert_eq!(by_id.email, email);
}

#[tokio::test]
#[ignore]
async fn test_user_repository_duplicate_email() {
    let repo = UserRepository::new(setup_test_db().await);
    let email = unique_email("dup");

    repo.create(new_user(&email)).await.unwrap();
    let result = repo.create(new_user(&email)).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn test_user_repository_email_is_case_sensitive() {
    let repo = UserRepository::new(setup_test_db().await);
    let email = unique_email("case");

    repo.create(new_user(&email)).await.unwrap();

    let found = repo.find_by_email(&email.to_uppercase()).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[ignore]
async fn test_user_repository_update_last_login() {
    let repo = UserRepository::new(setup_test_db().await);

    let mut user = repo.create(new_user(&unique_email("update"))).await.unwrap();
    user.last_login_at = Some(chrono::Utc::now());
    user.name = Some("Renamed".to_string());

    repo.update(&user).await.unwrap();

    let stored = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert!(stored.last_login_at.is_some());
    assert_eq!(stored.name.as_deref(), Some("Renamed"));
}

#[tokio::test]
#[ignore]
async fn test_user_repository_update_missing_user() {
    let repo = UserRepository::new(setup_test_db().await);

    let mut user = repo.create(new_user(&unique_email("missing"))).await.unwrap();
    user.id = Uuid::new_v4();

    let result = repo.update(&user).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn test_user_repository_find_missing() {
    let repo = UserRepository::new(setup_test_db().await);

    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    assert!(repo
        .find_by_email(&unique_email("absent"))
        .await
        .unwrap()
        .is_none());
}
