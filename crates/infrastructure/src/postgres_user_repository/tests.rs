use asset_manager_application::UserRepository;
use asset_manager_domain::{UserId, UserRole};
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use super::PostgresUserRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres user tests: {error}");
    }

    Some(pool)
}

async fn insert_user(pool: &PgPool, username: &str, email: &str, role: &str) -> i64 {
    let cleanup = sqlx::query(
        r#"
        DELETE FROM users
        WHERE username = $1 OR email = $2
        "#,
    )
    .bind(username)
    .bind(email)
    .execute(pool)
    .await;
    assert!(cleanup.is_ok());

    let inserted = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO users (username, email, role)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(username)
    .bind(email)
    .bind(role)
    .fetch_one(pool)
    .await;

    match inserted {
        Ok(id) => id,
        Err(error) => panic!("failed to insert fixture user '{username}': {error}"),
    }
}

#[tokio::test]
async fn username_lookup_returns_the_exact_match() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresUserRepository::new(pool.clone());
    let id = insert_user(
        &pool,
        "lookup-exact-admin",
        "lookup-exact-admin@example.com",
        "ROLE_ADMIN",
    )
    .await;

    let found = repository.find_by_username("lookup-exact-admin").await;
    assert!(found.is_ok());
    assert!(found.unwrap_or_default().is_some_and(|user| {
        user.id == UserId::from_i64(id)
            && user.email == "lookup-exact-admin@example.com"
            && user.role == UserRole::Admin
    }));

    let cased = repository.find_by_username("Lookup-Exact-Admin").await;
    assert!(cased.is_ok());
    assert!(cased.unwrap_or_default().is_none());
}

#[tokio::test]
async fn existence_probes_cover_username_and_email() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresUserRepository::new(pool.clone());
    insert_user(&pool, "probe-member", "probe-member@example.com", "ROLE_USER").await;

    let username_taken = repository.exists_by_username("probe-member").await;
    assert!(username_taken.is_ok());
    assert!(username_taken.unwrap_or(false));

    let email_taken = repository.exists_by_email("probe-member@example.com").await;
    assert!(email_taken.is_ok());
    assert!(email_taken.unwrap_or(false));

    let unknown_username = repository.exists_by_username("probe-nobody").await;
    assert!(unknown_username.is_ok());
    assert!(!unknown_username.unwrap_or(true));

    let unknown_email = repository.exists_by_email("probe-nobody@example.com").await;
    assert!(unknown_email.is_ok());
    assert!(!unknown_email.unwrap_or(true));
}

#[tokio::test]
async fn id_lookup_and_listing_cover_stored_users() {
    let Some(pool) = test_pool().await else {
        return;
    };

    let repository = PostgresUserRepository::new(pool.clone());
    let id = insert_user(
        &pool,
        "directory-carol",
        "directory-carol@example.com",
        "ROLE_USER",
    )
    .await;

    let found = repository.find_by_id(UserId::from_i64(id)).await;
    assert!(found.is_ok());
    assert!(
        found
            .unwrap_or_default()
            .is_some_and(|user| user.username == "directory-carol"
                && user.role == UserRole::Member)
    );

    let missing = repository.find_by_id(UserId::from_i64(i64::MAX)).await;
    assert!(missing.is_ok());
    assert!(missing.unwrap_or_default().is_none());

    let listed = repository.list_all().await;
    assert!(listed.is_ok());
    assert!(
        listed
            .unwrap_or_default()
            .iter()
            .any(|user| user.username == "directory-carol")
    );
}
