//! State and event subscriptions
//!
//! Presentation layers observe the engine through explicit subscriptions:
//! a state callback fires with every new snapshot, an event callback fires
//! once per completed command. Delivery is synchronous and at-most-once;
//! late subscribers see nothing retroactively.

use crate::models::{BudgetEvent, BudgetState};

/// Callback invoked with each new state snapshot
pub type StateCallback = Box<dyn Fn(&BudgetState) + Send>;

/// Callback invoked with each command outcome
pub type EventCallback = Box<dyn Fn(BudgetEvent) + Send>;

/// Token returned by a subscribe call; pass it back to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Holds the registered callbacks for one engine
#[derive(Default)]
pub(crate) struct SubscriberRegistry {
    next_id: u64,
    state_subscribers: Vec<(SubscriptionId, StateCallback)>,
    event_subscribers: Vec<(SubscriptionId, EventCallback)>,
}

impl SubscriberRegistry {
    fn next_id(&mut self) -> SubscriptionId {
        self.next_id += 1;
        SubscriptionId(self.next_id)
    }

    pub fn subscribe_state(&mut self, callback: StateCallback) -> SubscriptionId {
        let id = self.next_id();
        self.state_subscribers.push((id, callback));
        id
    }

    pub fn subscribe_events(&mut self, callback: EventCallback) -> SubscriptionId {
        let id = self.next_id();
        self.event_subscribers.push((id, callback));
        id
    }

    /// Remove a subscription; returns whether it existed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let state_len = self.state_subscribers.len();
        let event_len = self.event_subscribers.len();
        self.state_subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.event_subscribers.retain(|(sub_id, _)| *sub_id != id);
        state_len != self.state_subscribers.len() || event_len != self.event_subscribers.len()
    }

    pub fn notify_state(&self, state: &BudgetState) {
        for (_, callback) in &self.state_subscribers {
            callback(state);
        }
    }

    pub fn notify_event(&self, event: BudgetEvent) {
        for (_, callback) in &self.event_subscribers {
            callback(event);
        }
    }
}
