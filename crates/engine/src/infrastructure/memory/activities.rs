//! In-memory activity repository.

use async_trait::async_trait;
use glimpse_domain::{Activity, ActivityId};

use super::latency::{Operation, SimulatedLatency};
use super::table::{Keyed, Table};
use crate::infrastructure::ports::{ActivityRepo, RepoError};

impl Keyed for Activity {
    type Key = ActivityId;
    const ENTITY: &'static str = "Activity";

    fn key(&self) -> ActivityId {
        self.id
    }
}

pub struct MemoryActivityRepo {
    activities: Table<Activity>,
    latency: SimulatedLatency,
}

impl MemoryActivityRepo {
    pub fn new(activities: Vec<Activity>, latency: SimulatedLatency) -> Self {
        Self {
            activities: Table::new(activities),
            latency,
        }
    }
}

#[async_trait]
impl ActivityRepo for MemoryActivityRepo {
    async fn list(&self) -> Result<Vec<Activity>, RepoError> {
        self.latency.wait(Operation::ListActivities).await;
        let mut activities = self.activities.all().await;
        activities.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(activities)
    }

    async fn get(&self, id: ActivityId) -> Result<Option<Activity>, RepoError> {
        self.latency.wait(Operation::Get).await;
        Ok(self.activities.get(id).await)
    }

    async fn create(&self, activity: &Activity) -> Result<(), RepoError> {
        self.latency.wait(Operation::Create).await;
        self.activities.push_front(activity.clone()).await
    }

    async fn update(&self, activity: &Activity) -> Result<(), RepoError> {
        self.latency.wait(Operation::Update).await;
        self.activities.replace(activity.clone()).await
    }

    async fn delete(&self, id: ActivityId) -> Result<Activity, RepoError> {
        self.latency.wait(Operation::Delete).await;
        self.activities.remove(id).await
    }
}
