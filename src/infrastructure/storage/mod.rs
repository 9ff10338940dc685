pub mod in_memory;

use crate::core::errors::SettleError;
use crate::core::models::Event;
use async_trait::async_trait;

/// Persistence for events. Implementations only store what they are given;
/// balances are always computed by the caller.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn save_event(&self, event: Event) -> Result<(), SettleError>;
    async fn get_event(&self, event_id: &str) -> Result<Option<Event>, SettleError>;
    async fn list_events(&self) -> Result<Vec<Event>, SettleError>;
    async fn delete_event(&self, event_id: &str) -> Result<(), SettleError>;
}
