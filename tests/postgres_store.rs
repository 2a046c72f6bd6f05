//! Runs against a live database: `TEST_DATABASE_URL=postgres://... cargo test -- --ignored`.

use serde_json::json;
use sqlx::PgPool;
use todo_api::{ensure_database_exists, ensure_todos_table, NewTodo, PgTodoStore, TodoId, TodoStore};

/// Store over a fresh schema; the caller drops it with [`drop_schema`].
async fn store() -> (PgTodoStore, PgPool, String) {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set");
    ensure_database_exists(&url).await.unwrap();
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .unwrap();
    let schema = format!("todo_test_{}", TodoId::new().as_uuid().simple());
    ensure_todos_table(&pool, &schema).await.unwrap();
    (PgTodoStore::new(pool.clone(), &schema), pool, schema)
}

async fn drop_schema(pool: &PgPool, schema: &str) {
    sqlx::query(&format!("DROP SCHEMA IF EXISTS \"{schema}\" CASCADE"))
        .execute(pool)
        .await
        .unwrap();
}

fn new_todo(text: &str) -> NewTodo {
    NewTodo::from_body(json!({ "text": text })).unwrap()
}

#[tokio::test]
#[ignore]
async fn insert_find_delete() {
    let (store, pool, schema) = store().await;
    store.ping().await.unwrap();

    let first = store.insert(new_todo("todo1")).await.unwrap();
    let second = store.insert(new_todo("todo2")).await.unwrap();
    assert!(!first.completed);

    let all = store.find_all().await.unwrap();
    assert_eq!(all, vec![first.clone(), second.clone()]);

    assert_eq!(store.find_by_id(&first.id).await.unwrap(), Some(first.clone()));
    assert_eq!(store.find_by_id(&TodoId::new()).await.unwrap(), None);

    assert_eq!(store.delete_by_id(&first.id).await.unwrap(), Some(first.clone()));
    assert_eq!(store.delete_by_id(&first.id).await.unwrap(), None);
    assert_eq!(store.find_all().await.unwrap(), vec![second]);

    drop_schema(&pool, &schema).await;
}
