//! Open/close notifications for sibling components.
//!
//! Rust observers register a callback with
//! [`crate::controller::DrawerController::subscribe`]; the page side receives
//! the same [`DrawerEvent`] through [`crate::host::DrawerHost::announce`].

use serde::Serialize;

use crate::state::TransitionReason;

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

/// Name of the `CustomEvent` dispatched on `document`.
pub const EVENT_NAME: &str = "mobilemenu";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerAction {
    Open,
    Close,
}

impl DrawerAction {
    /// Event name reported to `window.analytics.track`.
    #[must_use]
    pub fn analytics_name(self) -> &'static str {
        match self {
            Self::Open => "mobile_menu_opened",
            Self::Close => "mobile_menu_closed",
        }
    }
}

/// Payload of a state change notification.
///
/// Serialises as `{ action, isOpen, reason, timestamp }`, the detail shape
/// page scripts listening for `mobilemenu` already read.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawerEvent {
    pub action: DrawerAction,
    pub is_open: bool,
    pub reason: TransitionReason,
    /// Milliseconds since the epoch.
    #[serde(rename = "timestamp")]
    pub timestamp_ms: f64,
}

impl DrawerEvent {
    /// JSON used as the `CustomEvent` detail.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Callback = Box<dyn FnMut(&DrawerEvent)>;

/// Registered observers, called in subscription order.
#[derive(Default)]
pub struct Observers {
    next_id: u64,
    callbacks: Vec<(SubscriptionId, Callback)>,
}

impl Observers {
    pub fn subscribe(&mut self, callback: impl FnMut(&DrawerEvent) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.callbacks.push((id, Box::new(callback)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.callbacks.len();
        self.callbacks.retain(|(existing, _)| *existing != id);
        self.callbacks.len() != before
    }

    pub fn notify(&mut self, event: &DrawerEvent) {
        for (_, callback) in &mut self.callbacks {
            callback(event);
        }
    }

    pub fn clear(&mut self) {
        self.callbacks.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}
