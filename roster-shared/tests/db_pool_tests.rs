/// Integration tests for the file-backed SQL pool and stores
///
/// Each test works on its own SQLite file under the system temp directory,
/// so they can run in parallel.

use roster_shared::db::{
    migrations::{get_migration_status, run_migrations},
    pool::{close_pool, create_pool, get_pool_stats, DatabaseConfig},
};
use roster_shared::models::{item::NewItem, user::NewUser};
use roster_shared::store::{
    sql::{SqlItemStore, SqlUserStore},
    ItemStore, UserStore,
};
use std::path::PathBuf;
use std::sync::Arc;

/// Helper returning a fresh database path and its URL
fn temp_database() -> (PathBuf, String) {
    let path = std::env::temp_dir().join(format!("roster-test-{}.sqlite3", uuid::Uuid::new_v4()));
    let url = format!("sqlite://{}", path.display());
    (path, url)
}

fn remove_database(path: &PathBuf) {
    let _ = std::fs::remove_file(path);
    let _ = std::fs::remove_file(path.with_extension("sqlite3-wal"));
    let _ = std::fs::remove_file(path.with_extension("sqlite3-shm"));
}

#[tokio::test]
async fn test_create_pool_creates_missing_file() {
    let (path, url) = temp_database();
    assert!(!path.exists());

    let pool = create_pool(DatabaseConfig {
        url,
        max_connections: 4,
        min_connections: 1,
        ..Default::default()
    })
    .await
    .expect("Failed to create pool");

    assert!(path.exists(), "database file should be created");
    assert!(get_pool_stats(&pool).total_connections >= 1);

    close_pool(pool).await;
    remove_database(&path);
}

#[tokio::test]
async fn test_data_survives_pool_restart() {
    let (path, url) = temp_database();
    let config = DatabaseConfig {
        url,
        ..Default::default()
    };

    let pool = create_pool(config.clone()).await.unwrap();
    run_migrations(&pool).await.unwrap();
    let created = SqlUserStore::new(pool.clone())
        .insert(NewUser::new("Persisted", "persisted@example.com"))
        .await
        .unwrap();
    close_pool(pool).await;

    let pool = create_pool(config).await.unwrap();
    let status = get_migration_status(&pool).await.unwrap();
    assert!(status.is_up_to_date);

    let users = SqlUserStore::new(pool.clone()).list(100).await.unwrap();
    assert_eq!(users, vec![created]);

    close_pool(pool).await;
    remove_database(&path);
}

#[tokio::test]
async fn test_concurrent_item_inserts_get_distinct_ids() {
    let (path, url) = temp_database();
    let pool = create_pool(DatabaseConfig {
        url,
        max_connections: 4,
        ..Default::default()
    })
    .await
    .unwrap();
    run_migrations(&pool).await.unwrap();

    let store = Arc::new(SqlItemStore::new(pool.clone()));
    let mut handles = Vec::new();
    for n in 0..10 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store.insert(NewItem::new(format!("item-{n}"))).await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().id);
    }
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);

    // Every returned id must already be readable, with no delay
    let listed: Vec<i64> = store.list(100).await.unwrap().iter().map(|i| i.id).collect();
    assert_eq!(listed, ids);

    close_pool(pool).await;
    remove_database(&path);
}

#[tokio::test]
async fn test_inserted_rows_are_visible_on_other_connections() {
    let (path, url) = temp_database();
    let pool = create_pool(DatabaseConfig {
        url,
        max_connections: 4,
        ..Default::default()
    })
    .await
    .unwrap();
    run_migrations(&pool).await.unwrap();

    let users = Arc::new(SqlUserStore::new(pool.clone()));
    let items = Arc::new(SqlItemStore::new(pool.clone()));

    for round in 0..5 {
        let mut handles = Vec::new();
        for n in 0..8 {
            let users = Arc::clone(&users);
            let items = Arc::clone(&items);
            handles.push(tokio::spawn(async move {
                let email = format!("user-{round}-{n}@example.com");
                let user = users.insert(NewUser::new("Concurrent", email)).await.unwrap();
                let item = items.insert(NewItem::new(format!("item-{round}-{n}"))).await.unwrap();

                let listed_users = users.list(1000).await.unwrap();
                assert!(listed_users.iter().any(|u| u.id == user.id));
                let listed_items = items.list(1000).await.unwrap();
                assert!(listed_items.iter().any(|i| i.id == item.id));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(users.list(1000).await.unwrap().len(), (round + 1) * 8);
        assert_eq!(items.list(1000).await.unwrap().len(), (round + 1) * 8);
    }

    close_pool(pool).await;
    remove_database(&path);
}
