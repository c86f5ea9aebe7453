//! DOM adapter seam.
//!
//! ARCHITECTURE
//! ============
//! [`crate::controller::DrawerController`] never touches `web_sys` directly.
//! Everything it needs from the page goes through [`DrawerHost`], and every
//! DOM event reaches it as a [`DomEvent`]. The browser implementation lives in
//! `web` (feature `hydrate`); tests drive the controller with an in-memory DOM.

use std::fmt;

use crate::error::DrawerError;
use crate::listeners::ListenerKind;
use crate::notify::DrawerEvent;

/// Elements inside the links list that take part in the focus trap.
pub const FOCUSABLE_SELECTOR: &str =
    r#"a[href], button, textarea, input[type="text"], input[type="radio"], input[type="checkbox"], select"#;

/// Markup for a toggle button the controller has to create itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleMarkup {
    pub class: String,
    pub label: String,
    /// Id of the links list, written to `aria-controls`.
    pub controls: String,
    /// Number of decorative hamburger lines.
    pub lines: usize,
    pub line_class: String,
}

/// Work deferred to a timer. `generation` is the open cycle that scheduled it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeferredTask {
    pub kind: DeferredKind,
    pub generation: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredKind {
    /// Bind the outside-press listener once the opening gesture has finished.
    ArmOutsidePress,
    /// Re-check the viewport after an orientation change.
    OrientationSettled,
    /// Delayed close after a link click.
    LinkClose,
}

/// A DOM event delivered to the controller by the host's listeners.
#[derive(Clone, Debug, PartialEq)]
pub enum DomEvent<N> {
    ToggleClick,
    ToggleKey { key: String },
    /// Click on an anchor inside the links list.
    LinkClick,
    EscapeKey { key: String },
    TrapKey { key: String, shift: bool },
    /// Document-level click; `target` is the innermost element pressed.
    Press { target: N },
    Resize { width: f64 },
    OrientationChange,
    VisibilityChange { hidden: bool },
    Timer(DeferredTask),
}

/// What the binding should do with the native event after dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventResponse {
    /// Let the browser run the default action (navigation, focus move).
    PassThrough,
    /// Call `preventDefault()`.
    Consume,
}

pub trait DrawerHost {
    /// Handle to a DOM element.
    type Node: Clone + PartialEq + fmt::Debug;

    // --- Discovery ---

    /// First element in document order matching `selector`.
    fn query(&self, selector: &str) -> Option<Self::Node>;

    /// True when `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Elements under `root` matching [`FOCUSABLE_SELECTOR`], in document order.
    fn focusables(&self, root: &Self::Node) -> Vec<Self::Node>;

    // --- Creation ---

    /// Create a toggle button and append it to `container`.
    fn create_toggle(&mut self, container: &Self::Node, markup: &ToggleMarkup) -> Result<Self::Node, DrawerError>;

    /// Create the backdrop overlay and append it to `body`.
    fn create_backdrop(&mut self, class: &str) -> Result<Self::Node, DrawerError>;

    fn remove(&mut self, node: &Self::Node);

    // --- Classes and attributes ---

    fn add_class(&mut self, node: &Self::Node, class: &str) -> Result<(), DrawerError>;
    fn remove_class(&mut self, node: &Self::Node, class: &str) -> Result<(), DrawerError>;
    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> Result<(), DrawerError>;
    fn remove_attribute(&mut self, node: &Self::Node, name: &str);

    // --- Body and viewport ---

    /// Inline value of a `body` style property; empty when unset.
    fn body_style(&self, property: &str) -> String;

    /// Set an inline `body` style property. An empty value removes it.
    fn set_body_style(&mut self, property: &str, value: &str) -> Result<(), DrawerError>;

    fn scroll_y(&self) -> f64;
    fn scroll_to(&mut self, y: f64);
    fn viewport_width(&self) -> f64;

    // --- Focus ---

    fn active_element(&self) -> Option<Self::Node>;
    fn focus(&mut self, node: &Self::Node);

    // --- Listeners, timers, notifications ---

    /// Tell the host which elements element-scoped listeners attach to.
    fn attach(&mut self, toggle: &Self::Node, links: &Self::Node);

    /// Install the listener for `kind`. The same handler reference must be
    /// reused by [`DrawerHost::unbind`].
    fn bind(&mut self, kind: ListenerKind) -> Result<(), DrawerError>;

    fn unbind(&mut self, kind: ListenerKind);

    /// Fire-and-forget timer delivering [`DomEvent::Timer`] after `delay_ms`.
    fn schedule(&mut self, delay_ms: u32, task: DeferredTask);

    /// Milliseconds since the epoch.
    fn now_ms(&self) -> f64;

    /// Publish a state change to the page.
    fn announce(&mut self, event: &DrawerEvent);
}
