//! Browser binding: `web-sys` host and the `NavDrawer` JS class.
//!
//! ARCHITECTURE
//! ============
//! The controller is shared as `Rc<RefCell<DrawerController<WebHost>>>`. Each
//! DOM listener is a single `Closure` per [`ListenerKind`], created on first
//! bind and kept for the host's lifetime, so add and remove always see the
//! same function. Closures hold a `Weak` to the controller and translate the
//! native event into a [`DomEvent`] before dispatch.
//!
//! Notifications are queued by [`WebHost::announce`] and published only after
//! the controller borrow is released, so page code reacting to a `mobilemenu`
//! event may call back into `NavDrawer` safely.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::sync::Once;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{CustomEvent, CustomEventInit, Document, Element, Event, EventTarget, HtmlElement, KeyboardEvent, Window};

use crate::config::DrawerConfig;
use crate::controller::DrawerController;
use crate::error::DrawerError;
use crate::host::{DeferredTask, DomEvent, DrawerHost, EventResponse, FOCUSABLE_SELECTOR, ToggleMarkup};
use crate::listeners::{ListenerKind, ListenerTarget};
use crate::notify::{DrawerEvent, EVENT_NAME};
use crate::report::{Severity, handle_error};

type Shared = Rc<RefCell<DrawerController<WebHost>>>;

fn dom_error(err: JsValue) -> DrawerError {
    DrawerError::Dom(format!("{err:?}"))
}

/// Install the console logger and panic hook once per page.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if let Err(err) = console_log::init_with_level(log::Level::Info) {
            log::debug!("navdrawer: logger already installed: {err}");
        }
    });
}

// =============================================================
// WebHost
// =============================================================

pub struct WebHost {
    window: Window,
    document: Document,
    shared: Weak<RefCell<DrawerController<WebHost>>>,
    toggle: Option<Element>,
    links: Option<Element>,
    handlers: HashMap<ListenerKind, Closure<dyn FnMut(Event)>>,
    bound: HashMap<ListenerKind, EventTarget>,
    announcements: Vec<DrawerEvent>,
}

impl WebHost {
    fn new(window: Window, document: Document, shared: Weak<RefCell<DrawerController<WebHost>>>) -> Self {
        Self {
            window,
            document,
            shared,
            toggle: None,
            links: None,
            handlers: HashMap::new(),
            bound: HashMap::new(),
            announcements: Vec::new(),
        }
    }

    fn take_announcements(&mut self) -> Vec<DrawerEvent> {
        std::mem::take(&mut self.announcements)
    }

    fn target_for(&self, kind: ListenerKind) -> Result<EventTarget, DrawerError> {
        let missing = |selector: &str| DrawerError::MissingElement { selector: selector.to_owned() };
        match kind.target() {
            ListenerTarget::Toggle => self.toggle.clone().map(Into::into).ok_or_else(|| missing("toggle")),
            ListenerTarget::Links => self.links.clone().map(Into::into).ok_or_else(|| missing("links")),
            ListenerTarget::Document => Ok(self.document.clone().into()),
            ListenerTarget::Window => Ok(self.window.clone().into()),
        }
    }

    fn remove_listener(&self, kind: ListenerKind, target: &EventTarget) {
        let Some(handler) = self.handlers.get(&kind) else {
            return;
        };
        if let Err(err) = target.remove_event_listener_with_callback(kind.event_name(), handler.as_ref().unchecked_ref())
        {
            handle_error(&dom_error(err), "WebHost::unbind", Severity::Low);
        }
    }
}

impl Drop for WebHost {
    fn drop(&mut self) {
        let bound: Vec<_> = self.bound.drain().collect();
        for (kind, target) in bound {
            self.remove_listener(kind, &target);
        }
    }
}

fn handler(kind: ListenerKind, shared: Weak<RefCell<DrawerController<WebHost>>>) -> Closure<dyn FnMut(Event)> {
    Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(dom_event) = translate(kind, &event) else {
            return;
        };
        let Some(shared) = shared.upgrade() else {
            return;
        };
        if dispatch(&shared, dom_event) == EventResponse::Consume {
            event.prevent_default();
        }
    })
}

fn translate(kind: ListenerKind, event: &Event) -> Option<DomEvent<Element>> {
    match kind {
        ListenerKind::ToggleClick => Some(DomEvent::ToggleClick),
        ListenerKind::ToggleKey => key_of(event).map(|(key, _)| DomEvent::ToggleKey { key }),
        ListenerKind::EscapeKey => key_of(event).map(|(key, _)| DomEvent::EscapeKey { key }),
        ListenerKind::FocusTrap => key_of(event).map(|(key, shift)| DomEvent::TrapKey { key, shift }),
        ListenerKind::LinkClick => match target_element(event)?.closest("a") {
            Ok(Some(_)) => Some(DomEvent::LinkClick),
            _ => None,
        },
        ListenerKind::OutsidePress => target_element(event).map(|target| DomEvent::Press { target }),
        ListenerKind::Resize => {
            let width = web_sys::window().map_or(0.0, |w| inner_width(&w));
            Some(DomEvent::Resize { width })
        }
        ListenerKind::OrientationChange => Some(DomEvent::OrientationChange),
        ListenerKind::Visibility => {
            let hidden = web_sys::window().and_then(|w| w.document()).is_some_and(|d| d.hidden());
            Some(DomEvent::VisibilityChange { hidden })
        }
    }
}

fn key_of(event: &Event) -> Option<(String, bool)> {
    event.dyn_ref::<KeyboardEvent>().map(|k| (k.key(), k.shift_key()))
}

fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_ref::<Element>().cloned()
}

fn inner_width(window: &Window) -> f64 {
    window.inner_width().map_or(0.0, |v| v.as_f64().unwrap_or(0.0))
}

/// Run `f` against the controller, then publish queued notifications.
fn with_controller<R>(shared: &Shared, f: impl FnOnce(&mut DrawerController<WebHost>) -> R) -> Option<R> {
    let (result, pending) = {
        let Ok(mut drawer) = shared.try_borrow_mut() else {
            log::warn!("navdrawer: re-entrant call ignored");
            return None;
        };
        let result = f(&mut drawer);
        (result, drawer.host_mut().take_announcements())
    };
    for event in &pending {
        publish(event);
    }
    Some(result)
}

fn dispatch(shared: &Shared, event: DomEvent<Element>) -> EventResponse {
    with_controller(shared, |drawer| drawer.handle(event)).unwrap_or(EventResponse::PassThrough)
}

/// Dispatch the `mobilemenu` event and forward to `window.analytics`.
fn publish(event: &DrawerEvent) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Some(document) = window.document() {
        match custom_event(event) {
            Ok(custom) => {
                if let Err(err) = document.dispatch_event(&custom) {
                    handle_error(&dom_error(err), "navdrawer::publish", Severity::Low);
                }
            }
            Err(err) => {
                handle_error(&err, "navdrawer::publish", Severity::Low);
            }
        }
    }
    track(&window, event.action.analytics_name());
}

fn custom_event(event: &DrawerEvent) -> Result<CustomEvent, DrawerError> {
    let json = event.to_json().map_err(|err| DrawerError::Dom(err.to_string()))?;
    let detail = js_sys::JSON::parse(&json).map_err(dom_error)?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    CustomEvent::new_with_event_init_dict(EVENT_NAME, &init).map_err(dom_error)
}

fn track(window: &Window, name: &str) {
    let Ok(analytics) = js_sys::Reflect::get(window, &JsValue::from_str("analytics")) else {
        return;
    };
    if analytics.is_undefined() || analytics.is_null() {
        return;
    }
    let Ok(track) = js_sys::Reflect::get(&analytics, &JsValue::from_str("track")) else {
        return;
    };
    let Some(track) = track.dyn_ref::<js_sys::Function>() else {
        return;
    };
    if let Err(err) = track.call1(&analytics, &JsValue::from_str(name)) {
        handle_error(&dom_error(err), "navdrawer::track", Severity::Low);
    }
}

impl DrawerHost for WebHost {
    type Node = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(err) => {
                handle_error(&dom_error(err), "WebHost::query", Severity::Low);
                None
            }
        }
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node))
    }

    fn focusables(&self, root: &Element) -> Vec<Element> {
        let list = match root.query_selector_all(FOCUSABLE_SELECTOR) {
            Ok(list) => list,
            Err(err) => {
                handle_error(&dom_error(err), "WebHost::focusables", Severity::Low);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_ref::<Element>().cloned())
            .collect()
    }

    fn create_toggle(&mut self, container: &Element, markup: &ToggleMarkup) -> Result<Element, DrawerError> {
        let button = self.document.create_element("button").map_err(dom_error)?;
        button.set_class_name(&markup.class);
        for (name, value) in [
            ("type", "button"),
            ("aria-label", markup.label.as_str()),
            ("aria-expanded", "false"),
            ("aria-controls", markup.controls.as_str()),
        ] {
            button.set_attribute(name, value).map_err(dom_error)?;
        }
        for _ in 0..markup.lines {
            let line = self.document.create_element("span").map_err(dom_error)?;
            line.set_class_name(&markup.line_class);
            line.set_attribute("aria-hidden", "true").map_err(dom_error)?;
            button.append_child(&line).map_err(dom_error)?;
        }
        container.append_child(&button).map_err(dom_error)?;
        Ok(button)
    }

    fn create_backdrop(&mut self, class: &str) -> Result<Element, DrawerError> {
        let body = self.document.body().ok_or_else(|| DrawerError::MissingElement { selector: "body".into() })?;
        let backdrop = self.document.create_element("div").map_err(dom_error)?;
        backdrop.set_class_name(class);
        backdrop.set_attribute("aria-hidden", "true").map_err(dom_error)?;
        body.append_child(&backdrop).map_err(dom_error)?;
        Ok(backdrop)
    }

    fn remove(&mut self, node: &Element) {
        node.remove();
    }

    fn add_class(&mut self, node: &Element, class: &str) -> Result<(), DrawerError> {
        node.class_list().add_1(class).map_err(dom_error)
    }

    fn remove_class(&mut self, node: &Element, class: &str) -> Result<(), DrawerError> {
        node.class_list().remove_1(class).map_err(dom_error)
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&mut self, node: &Element, name: &str, value: &str) -> Result<(), DrawerError> {
        node.set_attribute(name, value).map_err(dom_error)
    }

    fn remove_attribute(&mut self, node: &Element, name: &str) {
        if let Err(err) = node.remove_attribute(name) {
            handle_error(&dom_error(err), "WebHost::remove_attribute", Severity::Low);
        }
    }

    fn body_style(&self, property: &str) -> String {
        let Some(body) = self.document.body() else {
            return String::new();
        };
        body.style().get_property_value(property).unwrap_or_default()
    }

    fn set_body_style(&mut self, property: &str, value: &str) -> Result<(), DrawerError> {
        let body = self.document.body().ok_or_else(|| DrawerError::MissingElement { selector: "body".into() })?;
        let style = body.style();
        if value.is_empty() {
            style.remove_property(property).map(drop).map_err(dom_error)
        } else {
            style.set_property(property, value).map_err(dom_error)
        }
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, y: f64) {
        self.window.scroll_to_with_x_and_y(0.0, y);
    }

    fn viewport_width(&self) -> f64 {
        inner_width(&self.window)
    }

    fn active_element(&self) -> Option<Element> {
        self.document.active_element()
    }

    fn focus(&mut self, node: &Element) {
        let Some(element) = node.dyn_ref::<HtmlElement>() else {
            return;
        };
        if let Err(err) = element.focus() {
            handle_error(&dom_error(err), "WebHost::focus", Severity::Low);
        }
    }

    fn attach(&mut self, toggle: &Element, links: &Element) {
        self.toggle = Some(toggle.clone());
        self.links = Some(links.clone());
    }

    fn bind(&mut self, kind: ListenerKind) -> Result<(), DrawerError> {
        let target = self.target_for(kind)?;
        let shared = self.shared.clone();
        let handler = self.handlers.entry(kind).or_insert_with(|| handler(kind, shared));
        target
            .add_event_listener_with_callback(kind.event_name(), handler.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        self.bound.insert(kind, target);
        Ok(())
    }

    fn unbind(&mut self, kind: ListenerKind) {
        if let Some(target) = self.bound.remove(&kind) {
            self.remove_listener(kind, &target);
        }
    }

    fn schedule(&mut self, delay_ms: u32, task: DeferredTask) {
        let shared = self.shared.clone();
        Timeout::new(delay_ms, move || {
            if let Some(shared) = shared.upgrade() {
                dispatch(&shared, DomEvent::Timer(task));
            }
        })
        .forget();
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn announce(&mut self, event: &DrawerEvent) {
        self.announcements.push(event.clone());
    }
}

// =============================================================
// NavDrawer (JS surface)
// =============================================================

/// Drawer handle exposed to page scripts.
///
/// ```js
/// const drawer = new NavDrawer(JSON.stringify({ breakpoint_px: 900 }));
/// document.addEventListener("mobilemenu", (e) => console.log(e.detail.isOpen));
/// ```
#[wasm_bindgen]
pub struct NavDrawer {
    shared: Option<Shared>,
}

#[wasm_bindgen]
impl NavDrawer {
    /// Mount against the current document. `config` is an optional JSON
    /// object overriding [`DrawerConfig`] defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> NavDrawer {
        init_logging();
        let config = DrawerConfig::from_json_or_default(config.as_deref());
        let Some((window, document)) = web_sys::window().and_then(|w| w.document().map(|d| (w, d))) else {
            handle_error(&"no window or document", "NavDrawer::new", Severity::Low);
            return NavDrawer { shared: None };
        };
        let shared = Rc::new_cyclic(|weak: &Weak<RefCell<DrawerController<WebHost>>>| {
            RefCell::new(DrawerController::mount(WebHost::new(window, document, weak.clone()), config))
        });
        NavDrawer { shared: Some(shared) }
    }

    pub fn open(&self) {
        self.run(DrawerController::open);
    }

    pub fn close(&self) {
        self.run(DrawerController::close);
    }

    pub fn toggle(&self) {
        self.run(DrawerController::toggle);
    }

    pub fn destroy(&self) {
        self.run(DrawerController::destroy);
    }

    #[wasm_bindgen(getter = isOpen)]
    pub fn is_open(&self) -> bool {
        self.query(DrawerController::is_open)
    }

    /// False when the page had no drawer chrome or after `destroy()`.
    #[wasm_bindgen(getter = isActive)]
    pub fn is_active(&self) -> bool {
        self.query(DrawerController::is_active)
    }
}

/// `free()` from JS: tear down through the shared path so the close is
/// still published and the body is unpinned.
impl Drop for NavDrawer {
    fn drop(&mut self) {
        self.run(DrawerController::destroy);
    }
}

impl NavDrawer {
    fn run(&self, f: impl FnOnce(&mut DrawerController<WebHost>)) {
        if let Some(shared) = &self.shared {
            with_controller(shared, f);
        }
    }

    fn query(&self, f: impl FnOnce(&DrawerController<WebHost>) -> bool) -> bool {
        self.shared.as_ref().is_some_and(|shared| match shared.try_borrow() {
            Ok(drawer) => f(&drawer),
            Err(_) => false,
        })
    }
}
