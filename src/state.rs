//! Drawer state machine: two states and one transition table.
//!
//! There is no "opening" or "closing" state. A transition's side effects are
//! applied synchronously by the controller in the handler that produced the
//! trigger; visual timing belongs to CSS.

use serde::Serialize;

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawerState {
    #[default]
    Closed,
    Open,
}

/// Everything that can ask the drawer to change state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
    /// Toggle button activated (click, Enter or Space) or `toggle()`.
    Toggle,
    /// Imperative `open()`.
    Open,
    /// Imperative `close()`.
    Close,
    /// A link inside the drawer was activated.
    LinkActivated,
    Escape,
    /// Pointer press outside both the toggle and the links list.
    OutsidePress,
    /// Viewport is wider than the breakpoint.
    ViewportWide,
    /// Viewport is at or below the breakpoint.
    ViewportNarrow,
    /// The document became hidden.
    PageHidden,
    /// `destroy()` while open.
    Teardown,
}

/// Why the drawer closed (or `Opened` for the opening direction).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionReason {
    Opened,
    Toggle,
    Api,
    Link,
    Escape,
    OutsidePress,
    Viewport,
    PageHidden,
    Teardown,
}

impl Trigger {
    /// Reason recorded for a transition caused by this trigger.
    #[must_use]
    pub fn reason(self) -> TransitionReason {
        match self {
            Self::Toggle => TransitionReason::Toggle,
            Self::Open | Self::Close => TransitionReason::Api,
            Self::LinkActivated => TransitionReason::Link,
            Self::Escape => TransitionReason::Escape,
            Self::OutsidePress => TransitionReason::OutsidePress,
            Self::ViewportWide | Self::ViewportNarrow => TransitionReason::Viewport,
            Self::PageHidden => TransitionReason::PageHidden,
            Self::Teardown => TransitionReason::Teardown,
        }
    }
}

impl DrawerState {
    /// The transition table. `None` means the trigger changes nothing.
    #[must_use]
    pub fn next(self, trigger: Trigger) -> Option<Self> {
        match (self, trigger) {
            (Self::Closed, Trigger::Toggle | Trigger::Open) => Some(Self::Open),
            (
                Self::Open,
                Trigger::Toggle
                | Trigger::Close
                | Trigger::LinkActivated
                | Trigger::Escape
                | Trigger::OutsidePress
                | Trigger::ViewportWide
                | Trigger::PageHidden
                | Trigger::Teardown,
            ) => Some(Self::Closed),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}
