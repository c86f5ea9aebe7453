//! Navigation drawer controller.
//!
//! DESIGN
//! ======
//! One owned controller per page. Element references are resolved once at
//! [`DrawerController::mount`] and stored in a [`DrawerContext`]; if the page
//! lacks the required chrome there is no context and every operation is a
//! no-op. State changes go through [`DrawerState::next`] only, and all
//! listener bookkeeping goes through the context's [`ListenerSet`], so an
//! open/close cycle can never leave a handler behind.
//!
//! Deferred work (arming the outside-press listener, orientation settling,
//! delayed link close) is tagged with the open-cycle generation. A timer from
//! an earlier cycle finds a different generation and does nothing.

use crate::config::DrawerConfig;
use crate::error::DrawerError;
use crate::focus_trap::wrap_target;
use crate::host::{DeferredKind, DeferredTask, DomEvent, DrawerHost, EventResponse, ToggleMarkup};
use crate::listeners::{ListenerKind, ListenerSet};
use crate::notify::{DrawerAction, DrawerEvent, Observers, SubscriptionId};
use crate::report::{Severity, handle_error};
use crate::scroll_lock::ScrollLock;
use crate::state::{DrawerState, TransitionReason, Trigger};

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

const TOGGLE_LINES: usize = 3;
const TOGGLE_LINE_CLASS: &str = "btn--menu-toggle__line nav__toggle-line";

/// Element references and resources owned while the controller is live.
#[derive(Debug)]
pub struct DrawerContext<N> {
    pub toggle: N,
    pub links: N,
    pub backdrop: Option<N>,
    /// Present only while open.
    scroll_lock: Option<ScrollLock>,
    listeners: ListenerSet,
    created_toggle: bool,
    /// Attributes written onto pre-existing elements, removed on teardown.
    added_attributes: Vec<(N, &'static str)>,
}

pub struct DrawerController<H: DrawerHost> {
    host: H,
    config: DrawerConfig,
    state: DrawerState,
    context: Option<DrawerContext<H::Node>>,
    generation: u64,
    observers: Observers,
}

impl<H: DrawerHost> DrawerController<H> {
    /// Resolve the drawer chrome on the page and bind permanent listeners.
    ///
    /// Never fails: a page without a navigation container (and no existing
    /// toggle) or without a links list yields an inert controller.
    pub fn mount(mut host: H, config: DrawerConfig) -> Self {
        let context = match attach(&mut host, &config) {
            Ok(context) => {
                log::debug!("navdrawer: mounted (created_toggle={})", context.created_toggle);
                Some(context)
            }
            Err(err) => {
                handle_error(&err, "DrawerController::mount", Severity::Low);
                None
            }
        };
        Self { host, config, state: DrawerState::Closed, context, generation: 0, observers: Observers::default() }
    }

    // --- Imperative controls ---

    pub fn open(&mut self) {
        self.transition(Trigger::Open);
    }

    pub fn close(&mut self) {
        self.transition(Trigger::Close);
    }

    pub fn toggle(&mut self) {
        self.transition(Trigger::Toggle);
    }

    /// Close if open, unbind everything, remove created nodes and attributes.
    /// The controller is inert afterwards.
    pub fn destroy(&mut self) {
        if self.context.is_none() {
            return;
        }
        self.transition(Trigger::Teardown);
        if let Some(mut context) = self.context.take() {
            teardown(&mut self.host, &mut context);
        }
        self.observers.clear();
        log::debug!("navdrawer: destroyed");
    }

    // --- Queries ---

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    #[must_use]
    pub fn state(&self) -> DrawerState {
        self.state
    }

    /// False when mount found no chrome or after `destroy()`.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.context.is_some()
    }

    #[must_use]
    pub fn context(&self) -> Option<&DrawerContext<H::Node>> {
        self.context.as_ref()
    }

    /// Bound listeners; empty when inert.
    #[must_use]
    pub fn listeners(&self) -> ListenerSet {
        self.context.as_ref().map(|c| c.listeners.clone()).unwrap_or_default()
    }

    /// Scroll offset captured on open, `None` while closed.
    #[must_use]
    pub fn saved_scroll_position(&self) -> Option<f64> {
        self.context.as_ref().and_then(|c| c.scroll_lock.as_ref()).map(ScrollLock::scroll_y)
    }

    #[must_use]
    pub fn config(&self) -> &DrawerConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // --- Observers ---

    pub fn subscribe(&mut self, callback: impl FnMut(&DrawerEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    // --- Events ---

    /// Entry point for every listener the host has bound.
    pub fn handle(&mut self, event: DomEvent<H::Node>) -> EventResponse {
        if self.context.is_none() {
            return EventResponse::PassThrough;
        }
        match event {
            DomEvent::ToggleClick => {
                self.transition(Trigger::Toggle);
                EventResponse::Consume
            }
            DomEvent::ToggleKey { key } if key == "Enter" || key == " " => {
                self.transition(Trigger::Toggle);
                EventResponse::Consume
            }
            DomEvent::LinkClick if self.is_open() => {
                match self.config.link_close_delay_ms {
                    Some(delay) => self.schedule(delay, DeferredKind::LinkClose),
                    None => self.transition(Trigger::LinkActivated),
                }
                EventResponse::PassThrough
            }
            DomEvent::EscapeKey { key } if key == "Escape" && self.is_open() => {
                self.transition(Trigger::Escape);
                EventResponse::Consume
            }
            DomEvent::TrapKey { key, shift } if key == "Tab" && self.is_open() => self.trap_tab(shift),
            DomEvent::Press { target } if self.is_open() => {
                if self.is_outside(&target) {
                    self.transition(Trigger::OutsidePress);
                }
                EventResponse::PassThrough
            }
            DomEvent::Resize { width } => {
                let trigger = if self.config.is_wide(width) { Trigger::ViewportWide } else { Trigger::ViewportNarrow };
                self.transition(trigger);
                EventResponse::PassThrough
            }
            DomEvent::OrientationChange if self.is_open() => {
                self.schedule(self.config.orientation_settle_ms, DeferredKind::OrientationSettled);
                EventResponse::PassThrough
            }
            DomEvent::VisibilityChange { hidden: true } if self.config.close_on_hidden => {
                self.transition(Trigger::PageHidden);
                EventResponse::PassThrough
            }
            DomEvent::Timer(task) => {
                self.run_deferred(task);
                EventResponse::PassThrough
            }
            _ => EventResponse::PassThrough,
        }
    }

    // --- Internals ---

    fn transition(&mut self, trigger: Trigger) {
        if self.context.is_none() {
            return;
        }
        let Some(next) = self.state.next(trigger) else {
            return;
        };
        match next {
            DrawerState::Open => self.enter_open(),
            DrawerState::Closed => self.enter_closed(),
        }
        self.state = next;

        let (action, reason) = match next {
            DrawerState::Open => (DrawerAction::Open, TransitionReason::Opened),
            DrawerState::Closed => (DrawerAction::Close, trigger.reason()),
        };
        let event = DrawerEvent { action, is_open: next.is_open(), reason, timestamp_ms: self.host.now_ms() };
        log::debug!("navdrawer: {action:?} ({reason:?})");
        self.observers.notify(&event);
        self.host.announce(&event);
    }

    fn enter_open(&mut self) {
        self.generation += 1;
        let Self { host, config, context, .. } = self;
        let Some(context) = context.as_mut() else {
            return;
        };

        let scroll_y = host.scroll_y();
        set_markers(host, config, context, true);
        context.scroll_lock = Some(ScrollLock::acquire(host, scroll_y));

        let mut kinds = vec![ListenerKind::EscapeKey, ListenerKind::Resize, ListenerKind::OrientationChange];
        if config.trap_focus {
            kinds.push(ListenerKind::FocusTrap);
        }
        if config.close_on_hidden {
            kinds.push(ListenerKind::Visibility);
        }
        for kind in kinds {
            if let Err(err) = context.listeners.bind(host, kind) {
                handle_error(&err, "DrawerController::open", Severity::Medium);
            }
        }

        if config.trap_focus {
            if let Some(first) = host.focusables(&context.links).first() {
                host.focus(first);
            }
        }

        self.schedule(self.config.outside_press_arm_ms, DeferredKind::ArmOutsidePress);
    }

    fn enter_closed(&mut self) {
        let Self { host, config, context, .. } = self;
        let Some(context) = context.as_mut() else {
            return;
        };

        context.listeners.unbind_while_open(host);
        if let Some(lock) = context.scroll_lock.take() {
            lock.release(host);
        }
        set_markers(host, config, context, false);
        host.focus(&context.toggle);
    }

    fn schedule(&mut self, delay_ms: u32, kind: DeferredKind) {
        self.host.schedule(delay_ms, DeferredTask { kind, generation: self.generation });
    }

    fn run_deferred(&mut self, task: DeferredTask) {
        if task.generation != self.generation || !self.is_open() {
            log::debug!("navdrawer: ignoring stale {:?}", task.kind);
            return;
        }
        match task.kind {
            DeferredKind::ArmOutsidePress => {
                let Self { host, context, .. } = self;
                if let Some(context) = context.as_mut() {
                    if let Err(err) = context.listeners.bind(host, ListenerKind::OutsidePress) {
                        handle_error(&err, "DrawerController::arm_outside_press", Severity::Medium);
                    }
                }
            }
            DeferredKind::OrientationSettled => {
                if self.config.is_wide(self.host.viewport_width()) {
                    self.transition(Trigger::ViewportWide);
                }
            }
            DeferredKind::LinkClose => self.transition(Trigger::LinkActivated),
        }
    }

    /// A press is outside when it hits neither the toggle nor the links list.
    /// The backdrop sits outside both, so pressing it closes the drawer.
    fn is_outside(&self, target: &H::Node) -> bool {
        let Some(context) = self.context.as_ref() else {
            return false;
        };
        if context.backdrop.as_ref() == Some(target) {
            return true;
        }
        !self.host.contains(&context.toggle, target) && !self.host.contains(&context.links, target)
    }

    fn trap_tab(&mut self, shift: bool) -> EventResponse {
        let Some(context) = self.context.as_ref() else {
            return EventResponse::PassThrough;
        };
        let focusables = self.host.focusables(&context.links);
        let active = self.host.active_element().and_then(|el| focusables.iter().position(|f| *f == el));
        match wrap_target(focusables.len(), active, shift).and_then(|i| focusables.get(i)) {
            Some(target) => {
                self.host.focus(target);
                EventResponse::Consume
            }
            None => EventResponse::PassThrough,
        }
    }
}

/// Dropping a live controller tears it down, so the body is never left pinned.
impl<H: DrawerHost> Drop for DrawerController<H> {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Resolve elements, create missing chrome and bind permanent listeners.
fn attach<H: DrawerHost>(host: &mut H, config: &DrawerConfig) -> Result<DrawerContext<H::Node>, DrawerError> {
    let links = host
        .query(&config.links_selector)
        .ok_or_else(|| DrawerError::MissingElement { selector: config.links_selector.clone() })?;

    let controls = match host.attribute(&links, "id") {
        Some(id) if !id.is_empty() => id,
        _ => config.links_id.clone(),
    };

    let (toggle, created_toggle) = match host.query(&config.toggle_selector) {
        Some(existing) => (existing, false),
        None => {
            let container = host
                .query(&config.container_selector)
                .ok_or_else(|| DrawerError::MissingElement { selector: config.container_selector.clone() })?;
            let markup = ToggleMarkup {
                class: config.toggle_class.clone(),
                label: config.toggle_label.clone(),
                controls: controls.clone(),
                lines: TOGGLE_LINES,
                line_class: TOGGLE_LINE_CLASS.to_owned(),
            };
            (host.create_toggle(&container, &markup)?, true)
        }
    };

    let mut context = DrawerContext {
        toggle,
        links,
        backdrop: None,
        scroll_lock: None,
        listeners: ListenerSet::new(),
        created_toggle,
        added_attributes: Vec::new(),
    };

    if let Err(err) = decorate(host, config, &mut context, &controls) {
        teardown(host, &mut context);
        return Err(err);
    }

    if let Some(backdrop) = &config.backdrop {
        match host.create_backdrop(&backdrop.class) {
            Ok(node) => context.backdrop = Some(node),
            Err(err) => {
                handle_error(&err, "DrawerController::mount", Severity::Low);
            }
        }
    }

    host.attach(&context.toggle, &context.links);
    for kind in [ListenerKind::ToggleClick, ListenerKind::ToggleKey, ListenerKind::LinkClick] {
        if let Err(err) = context.listeners.bind(host, kind) {
            teardown(host, &mut context);
            return Err(err);
        }
    }
    Ok(context)
}

/// Accessibility attributes and a clean closed-state starting point.
fn decorate<H: DrawerHost>(
    host: &mut H,
    config: &DrawerConfig,
    context: &mut DrawerContext<H::Node>,
    controls: &str,
) -> Result<(), DrawerError> {
    let toggle = context.toggle.clone();
    let links = context.links.clone();
    let defaults = [
        (&links, "id", controls),
        (&toggle, "type", "button"),
        (&toggle, "aria-controls", controls),
        (&links, "role", "navigation"),
        (&links, "aria-label", config.links_label.as_str()),
    ];
    for (node, name, value) in defaults {
        if host.attribute(node, name).is_none_or(|v| v.is_empty()) {
            host.set_attribute(node, name, value)?;
            if !(context.created_toggle && *node == toggle) {
                context.added_attributes.push((node.clone(), name));
            }
        }
    }
    if !context.created_toggle && host.attribute(&toggle, "aria-expanded").is_none() {
        context.added_attributes.push((toggle.clone(), "aria-expanded"));
    }
    set_markers(host, config, context, false);
    Ok(())
}

/// Put the open markers on (or take them off) the toggle, links and backdrop.
fn set_markers<H: DrawerHost>(host: &mut H, config: &DrawerConfig, context: &DrawerContext<H::Node>, open: bool) {
    let mut results = Vec::new();
    for (node, classes) in
        [(&context.toggle, &config.toggle_active_classes), (&context.links, &config.links_active_classes)]
    {
        for class in classes {
            results.push(if open { host.add_class(node, class) } else { host.remove_class(node, class) });
        }
    }
    results.push(host.set_attribute(&context.toggle, "aria-expanded", if open { "true" } else { "false" }));
    if let (Some(node), Some(backdrop)) = (&context.backdrop, &config.backdrop) {
        results.push(if open {
            host.add_class(node, &backdrop.visible_class)
        } else {
            host.remove_class(node, &backdrop.visible_class)
        });
    }
    for err in results.into_iter().filter_map(Result::err) {
        handle_error(&err, "DrawerController::set_markers", Severity::Medium);
    }
}

/// Undo everything `attach` did. All-or-nothing: runs every step even when
/// an earlier one is a no-op.
fn teardown<H: DrawerHost>(host: &mut H, context: &mut DrawerContext<H::Node>) {
    context.listeners.unbind_all(host);
    if let Some(lock) = context.scroll_lock.take() {
        lock.release(host);
    }
    if let Some(backdrop) = context.backdrop.take() {
        host.remove(&backdrop);
    }
    for (node, name) in context.added_attributes.drain(..) {
        host.remove_attribute(&node, name);
    }
    if context.created_toggle {
        host.remove(&context.toggle);
    }
}
