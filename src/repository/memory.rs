//! In-memory event repository (for development/testing)

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::Event;

use super::{EventRepository, RepositoryError, RepositoryResult};

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    events: BTreeMap<i64, Event>,
}

/// Event repository kept in process memory
///
/// Ids are assigned from 1 upwards and never reused. Iteration follows id
/// order, which matches insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemoryEventRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryEventRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect_where<F>(&self, predicate: F) -> Vec<Event>
    where
        F: Fn(&Event) -> bool,
    {
        let store = self.store.read().await;
        store
            .events
            .values()
            .filter(|event| predicate(event))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn find_all(&self) -> RepositoryResult<Vec<Event>> {
        Ok(self.collect_where(|_| true).await)
    }

    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Event>> {
        let store = self.store.read().await;
        Ok(store.events.get(&id).cloned())
    }

    async fn find_by_location(&self, location: &str) -> RepositoryResult<Vec<Event>> {
        Ok(self.collect_where(|event| event.location == location).await)
    }

    async fn find_upcoming(&self, after: NaiveDate) -> RepositoryResult<Vec<Event>> {
        Ok(self.collect_where(|event| event.event_date > after).await)
    }

    async fn save(&self, mut event: Event) -> RepositoryResult<Event> {
        let mut store = self.store.write().await;

        let id = match event.id {
            Some(id) => {
                if !store.events.contains_key(&id) {
                    return Err(RepositoryError::Missing(id));
                }
                id
            }
            None => {
                store.last_id += 1;
                store.last_id
            }
        };

        event.id = Some(id);
        store.events.insert(id, event.clone());

        tracing::debug!(event_id = id, "Saved event in memory");
        Ok(event)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let mut store = self.store.write().await;
        Ok(store.events.remove(&id).is_some())
    }
}
