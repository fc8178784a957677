//! Live MongoDB checks. Run with `cargo test -- --ignored` and `MONGO_URI` set.

mod common;

use blogql::{
    blogs::{model::Blog, repo::{BlogRepo, MongoBlogRepo}},
    db::Gateway,
    users::{model::User, repo::{MongoUserRepo, UserRepo}},
};
use bson::DateTime;
use common::{random_email, random_string};

/// Connects to a throwaway database named after `TEST_DATABASE_NAME`.
async fn connect() -> Gateway {
    dotenvy::dotenv().ok();
    let uri = std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".into());
    let base = std::env::var("TEST_DATABASE_NAME").unwrap_or_else(|_| "blogql_test".into());
    let name = format!("{base}_{}", random_string(6).to_lowercase());
    Gateway::connect(&uri, &name).await.expect("connect to mongo")
}

async fn teardown(gateway: Gateway) {
    gateway.database().drop(None).await.expect("drop test database");
    gateway.disconnect().await;
}

#[tokio::test]
#[ignore]
async fn users_round_trip_through_mongo() {
    let gateway = connect().await;
    let repo = MongoUserRepo::new(&gateway);
    let user = User::new("ada", &random_email(), "hash".into());

    let id = repo.insert(&user).await.expect("insert");
    assert_eq!(id, user.id);

    let by_email = repo.find_by_email(&user.email).await.expect("find").expect("some");
    assert_eq!(by_email.id, user.id);
    assert_eq!(by_email.password_hash, "hash");
    assert!(repo.find_by_id(user.id).await.expect("find").is_some());
    assert!(repo.find_by_email("nobody@example.com").await.expect("find").is_none());

    teardown(gateway).await;
}

#[tokio::test]
#[ignore]
async fn blogs_are_owned_by_their_author() {
    let gateway = connect().await;
    let repo = MongoBlogRepo::new(&gateway);
    let author = User::new("ada", &random_email(), "hash".into());
    let other = User::new("bob", &random_email(), "hash".into());

    let older = Blog::new("older", "a", &author);
    let newer = Blog::new("newer", "b", &author);
    repo.insert(&older).await.expect("insert");
    repo.insert(&newer).await.expect("insert");

    let listed = repo.list_newest_first().await.expect("list");
    let ids: Vec<_> = listed.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![newer.id, older.id]);
    assert!(listed.iter().all(|b| b.author.password_hash.is_empty()));

    let denied = repo
        .update_owned(older.id, other.id, "x", "y", DateTime::now())
        .await
        .expect("update");
    assert!(denied.is_none());

    let updated = repo
        .update_owned(older.id, author.id, "edited", "body", DateTime::now())
        .await
        .expect("update")
        .expect("owned blog updated");
    assert_eq!(updated.title, "edited");
    assert!(updated.updated_at.is_some());

    assert_eq!(repo.delete_owned(newer.id, other.id).await.expect("delete"), 0);
    assert_eq!(repo.delete_owned(newer.id, author.id).await.expect("delete"), 1);
    assert!(repo.find_by_id(newer.id).await.expect("find").is_none());

    teardown(gateway).await;
}
