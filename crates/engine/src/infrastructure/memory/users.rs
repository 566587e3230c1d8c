//! In-memory user repository.

use async_trait::async_trait;
use glimpse_domain::{User, UserId};

use super::latency::{Operation, SimulatedLatency};
use super::table::{Keyed, Table};
use crate::infrastructure::ports::{RepoError, UserRepo};

impl Keyed for User {
    type Key = UserId;
    const ENTITY: &'static str = "User";

    fn key(&self) -> UserId {
        self.id
    }
}

pub struct MemoryUserRepo {
    users: Table<User>,
    latency: SimulatedLatency,
}

impl MemoryUserRepo {
    pub fn new(users: Vec<User>, latency: SimulatedLatency) -> Self {
        Self {
            users: Table::new(users),
            latency,
        }
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn list(&self) -> Result<Vec<User>, RepoError> {
        self.latency.wait(Operation::ListUsers).await;
        Ok(self.users.all().await)
    }

    async fn get(&self, id: UserId) -> Result<Option<User>, RepoError> {
        self.latency.wait(Operation::Get).await;
        Ok(self.users.get(id).await)
    }

    async fn get_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        self.latency.wait(Operation::Get).await;
        Ok(self.users.find(|user| user.username.matches(username)).await)
    }

    async fn create(&self, user: &User) -> Result<(), RepoError> {
        self.latency.wait(Operation::Create).await;
        let taken = self
            .users
            .find(|existing| existing.username.matches(user.username.as_str()))
            .await;
        if taken.is_some() {
            return Err(RepoError::constraint(format!(
                "username {} is taken",
                user.username
            )));
        }
        self.users.push(user.clone()).await
    }

    async fn update(&self, user: &User) -> Result<(), RepoError> {
        self.latency.wait(Operation::Update).await;
        self.users.replace(user.clone()).await
    }

    async fn delete(&self, id: UserId) -> Result<User, RepoError> {
        self.latency.wait(Operation::Delete).await;
        self.users.remove(id).await
    }
}
