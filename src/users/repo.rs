use anyhow::Context;
use async_trait::async_trait;
use bson::{doc, oid::ObjectId};
use mongodb::Collection;

use crate::{
    db::{Gateway, USER_COLLECTION},
    users::model::User,
};

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn insert(&self, user: &User) -> anyhow::Result<ObjectId>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>>;
}

#[derive(Clone)]
pub struct MongoUserRepo {
    users: Collection<User>,
}

impl MongoUserRepo {
    pub fn new(gateway: &Gateway) -> Self {
        Self {
            users: gateway.collection(USER_COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepo for MongoUserRepo {
    async fn insert(&self, user: &User) -> anyhow::Result<ObjectId> {
        let res = self
            .users
            .insert_one(user, None)
            .await
            .context("insert user")?;
        res.inserted_id
            .as_object_id()
            .context("inserted user id is not an ObjectId")
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let user = self
            .users
            .find_one(doc! { "email": email }, None)
            .await
            .context("find user by email")?;
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> anyhow::Result<Option<User>> {
        let user = self
            .users
            .find_one(doc! { "_id": id }, None)
            .await
            .context("find user by id")?;
        Ok(user)
    }
}
