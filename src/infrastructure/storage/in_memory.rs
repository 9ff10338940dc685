use crate::core::errors::SettleError;
use crate::core::models::Event;
use crate::infrastructure::storage::EventStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryEventStore {
    events: Arc<RwLock<HashMap<String, Event>>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn save_event(&self, event: Event) -> Result<(), SettleError> {
        let mut events = self.events.write().await;
        events.insert(event.id.clone(), event);
        Ok(())
    }

    async fn get_event(&self, event_id: &str) -> Result<Option<Event>, SettleError> {
        let events = self.events.read().await;
        Ok(events.get(event_id).cloned())
    }

    async fn list_events(&self) -> Result<Vec<Event>, SettleError> {
        let events = self.events.read().await;
        let mut listed: Vec<Event> = events.values().cloned().collect();
        listed.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(listed)
    }

    async fn delete_event(&self, event_id: &str) -> Result<(), SettleError> {
        let mut events = self.events.write().await;
        events
            .remove(event_id)
            .map(|_| ())
            .ok_or_else(|| SettleError::EventNotFound(event_id.to_string()))
    }
}
