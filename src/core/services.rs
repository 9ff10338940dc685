use crate::config::{CONFIG, EngineSettings, init_logging};
use crate::constants::{
    DEBTS_QUERIED, EVENT_AUTO_SETTLED, EVENT_CREATED, EVENT_DELETED, EVENT_REOPENED, EVENT_SETTLED,
    EXPENSE_ADDED, EXPENSE_REMOVED, PAYMENT_ADDED, PAYMENT_REMOVED,
};
use crate::core::errors::SettleError;
use crate::core::models::{AppLog, BalanceGraph, Event, Expense, Payment};
use crate::core::settlement::SettlementFlags;
use crate::core::splitter::{validate_expense, validate_payment};
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::EventStore;
use log::{debug, info, warn};
use serde::Serialize;
use serde_json::json;
use tokio::sync::Mutex;
use uuid::Uuid;

const MAX_EVENT_NAME_LENGTH: usize = 100;

/// Event after a mutation, with the settle signal computed for it.
#[derive(Clone, Debug, Serialize)]
pub struct EventUpdate {
    pub event: Event,
    pub flags: SettlementFlags,
}

/// Runs the engine on every change to a stored event.
///
/// Writes go through one async mutex, so a single writer touches an event
/// at a time.
pub struct EventService<S: EventStore, L: LoggingService> {
    storage: S,
    logging: L,
    settings: EngineSettings,
    write_lock: Mutex<()>,
}

impl<S: EventStore, L: LoggingService> EventService<S, L> {
    pub fn new(storage: S, logging: L, settings: EngineSettings) -> Self {
        info!("Initializing EventService with {:?}", settings);
        EventService {
            storage,
            logging,
            settings,
            write_lock: Mutex::new(()),
        }
    }

    /// Builds a service from the process configuration and installs the
    /// log backend.
    pub fn from_config(storage: S, logging: L) -> Self {
        init_logging();
        Self::new(storage, logging, CONFIG.engine_settings())
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    async fn load_event(&self, event_id: &str) -> Result<Event, SettleError> {
        self.storage
            .get_event(event_id)
            .await?
            .ok_or_else(|| SettleError::EventNotFound(event_id.to_string()))
    }

    async fn load_active_event(&self, event_id: &str) -> Result<Event, SettleError> {
        let event = self.load_event(event_id).await?;
        if event.settled {
            warn!("Attempted to modify settled event {}", event_id);
            return Err(SettleError::EventAlreadySettled(event_id.to_string()));
        }
        Ok(event)
    }

    async fn log_and_audit(
        &self,
        event_id: Option<&str>,
        action: &str,
        details: serde_json::Value,
    ) -> Result<(), SettleError> {
        debug!("{} {:?}: {}", action, event_id, details);
        self.logging.log_action(action, details, event_id).await
    }

    fn validate_name(&self, name: &str) -> Result<(), SettleError> {
        if name.trim().is_empty() {
            return Err(SettleError::invalid_input(
                "name",
                "Invalid name",
                "name cannot be empty",
            ));
        }
        if name.chars().count() > MAX_EVENT_NAME_LENGTH {
            return Err(SettleError::invalid_input(
                "name",
                "name Too Long",
                format!("name cannot exceed {} characters", MAX_EVENT_NAME_LENGTH),
            ));
        }
        if name.chars().any(char::is_control) {
            return Err(SettleError::invalid_input(
                "name",
                "Invalid name",
                "name contains invalid characters",
            ));
        }
        Ok(())
    }

    /// Computes the settle signal, applies it when auto-settle is on, and
    /// stores the event. Audit entries are written only once the event is
    /// stored: the mutation first, then any auto-settlement it caused.
    async fn commit(
        &self,
        event: Event,
        action: &str,
        details: serde_json::Value,
    ) -> Result<EventUpdate, SettleError> {
        let report = event.debt_report(self.settings.simplify_debts);
        let mut event = event;

        let auto_settled = if self.settings.auto_settle && !report.flags.is_empty() {
            let changed = report.flags.apply_to_event(&mut event);
            event = event.recomputed();
            Some(changed)
        } else {
            None
        };

        self.storage.save_event(event.clone()).await?;
        self.log_and_audit(Some(&event.id), action, details).await?;

        if let Some(changed) = auto_settled {
            self.log_and_audit(
                Some(&event.id),
                EVENT_AUTO_SETTLED,
                json!({
                    "expense_ids": report.flags.expense_ids,
                    "payment_ids": report.flags.payment_ids,
                    "records_settled": changed
                }),
            )
            .await?;
        }

        Ok(EventUpdate {
            event,
            flags: report.flags,
        })
    }

    pub async fn create_event(&self, name: String) -> Result<Event, SettleError> {
        self.validate_name(&name)?;
        let _guard = self.write_lock.lock().await;

        let event = Event::new(Uuid::new_v4().to_string(), name);
        self.storage.save_event(event.clone()).await?;
        self.log_and_audit(
            Some(&event.id),
            EVENT_CREATED,
            json!({ "event_id": event.id, "name": event.name }),
        )
        .await?;
        Ok(event)
    }

    pub async fn get_event(&self, event_id: &str) -> Result<Option<Event>, SettleError> {
        self.storage.get_event(event_id).await
    }

    pub async fn list_events(&self) -> Result<Vec<Event>, SettleError> {
        self.storage.list_events().await
    }

    pub async fn delete_event(&self, event_id: &str) -> Result<(), SettleError> {
        let _guard = self.write_lock.lock().await;

        self.storage.delete_event(event_id).await?;
        self.log_and_audit(Some(event_id), EVENT_DELETED, json!({ "event_id": event_id }))
            .await
    }

    pub async fn add_expense(&self, event_id: &str, expense: Expense) -> Result<EventUpdate, SettleError> {
        validate_expense(&expense)?;
        let _guard = self.write_lock.lock().await;

        let event = self.load_active_event(event_id).await?;
        if event.expenses.contains_key(&expense.id) {
            warn!("Expense {} already recorded in event {}", expense.id, event_id);
            return Err(SettleError::DuplicateExpense(expense.id));
        }
        let details = json!({ "event_id": event_id, "expense_id": expense.id, "amount": expense.amount });

        self.commit(event.add_expense(expense), EXPENSE_ADDED, details)
            .await
    }

    pub async fn add_payment(&self, event_id: &str, payment: Payment) -> Result<EventUpdate, SettleError> {
        validate_payment(&payment)?;
        let _guard = self.write_lock.lock().await;

        let event = self.load_active_event(event_id).await?;
        if event.payments.contains_key(&payment.id) {
            warn!("Payment {} already recorded in event {}", payment.id, event_id);
            return Err(SettleError::DuplicatePayment(payment.id));
        }
        let details = json!({
            "event_id": event_id,
            "payment_id": payment.id,
            "from": payment.from,
            "to": payment.to,
            "amount": payment.amount
        });

        self.commit(event.add_payment(payment), PAYMENT_ADDED, details)
            .await
    }

    pub async fn remove_expense(&self, event_id: &str, expense_id: &str) -> Result<EventUpdate, SettleError> {
        let _guard = self.write_lock.lock().await;

        let event = self.load_active_event(event_id).await?;
        if !event.expenses.contains_key(expense_id) {
            return Err(SettleError::ExpenseNotFound(expense_id.to_string()));
        }
        let details = json!({ "event_id": event_id, "expense_id": expense_id });

        self.commit(event.remove_expense(expense_id), EXPENSE_REMOVED, details)
            .await
    }

    pub async fn remove_payment(&self, event_id: &str, payment_id: &str) -> Result<EventUpdate, SettleError> {
        let _guard = self.write_lock.lock().await;

        let event = self.load_active_event(event_id).await?;
        if !event.payments.contains_key(payment_id) {
            return Err(SettleError::PaymentNotFound(payment_id.to_string()));
        }
        let details = json!({ "event_id": event_id, "payment_id": payment_id });

        self.commit(event.remove_payment(payment_id), PAYMENT_REMOVED, details)
            .await
    }

    /// Current balances of the event. `simplify_debts` overrides the
    /// configured default.
    pub async fn event_debts(
        &self,
        event_id: &str,
        simplify_debts: Option<bool>,
    ) -> Result<BalanceGraph, SettleError> {
        let event = self.load_event(event_id).await?;
        let simplify_debts = simplify_debts.unwrap_or(self.settings.simplify_debts);
        let graph = event.compute_debts(simplify_debts);

        self.log_and_audit(
            Some(event_id),
            DEBTS_QUERIED,
            json!({
                "event_id": event_id,
                "simplified": simplify_debts,
                "debts": graph.edge_count()
            }),
        )
        .await?;
        Ok(graph)
    }

    pub async fn can_settle(
        &self,
        event_id: &str,
        simplify_debts: Option<bool>,
    ) -> Result<bool, SettleError> {
        let event = self.load_event(event_id).await?;
        Ok(event.can_settle(simplify_debts.unwrap_or(self.settings.simplify_debts)))
    }

    pub async fn settle_event(&self, event_id: &str) -> Result<Event, SettleError> {
        let _guard = self.write_lock.lock().await;

        let event = self.load_active_event(event_id).await?.settle();
        self.storage.save_event(event.clone()).await?;

        self.log_and_audit(
            Some(event_id),
            EVENT_SETTLED,
            json!({ "event_id": event_id, "outstanding_debts": event.current_debts.edge_count() }),
        )
        .await?;
        Ok(event)
    }

    pub async fn reopen_event(&self, event_id: &str) -> Result<Event, SettleError> {
        let _guard = self.write_lock.lock().await;

        let event = self.load_event(event_id).await?;
        if !event.settled {
            warn!("Attempted to reopen active event {}", event_id);
            return Err(SettleError::EventNotSettled(event_id.to_string()));
        }
        let event = event.reopen();
        self.storage.save_event(event.clone()).await?;

        self.log_and_audit(Some(event_id), EVENT_REOPENED, json!({ "event_id": event_id }))
            .await?;
        Ok(event)
    }

    pub async fn get_app_logs(&self) -> Result<Vec<AppLog>, SettleError> {
        self.logging.get_logs().await
    }
}
