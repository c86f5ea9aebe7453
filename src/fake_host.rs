//! In-memory DOM used to drive the controller in tests.
//!
//! Supports exactly what the drawer needs: class selectors (comma lists),
//! a parent tree, attributes, inline body styles, focus, listener and timer
//! bookkeeping. Every mutation is appended to `log` so tests can assert order.

use std::collections::BTreeMap;

use crate::error::DrawerError;
use crate::host::{DeferredTask, DrawerHost, ToggleMarkup};
use crate::listeners::ListenerKind;
use crate::notify::DrawerEvent;

pub type NodeId = usize;

pub const BODY: NodeId = 0;

#[derive(Clone, Debug)]
pub struct FakeNode {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub parent: Option<NodeId>,
    pub removed: bool,
}

#[derive(Clone, Debug, Default)]
pub struct FakeHost {
    pub nodes: Vec<FakeNode>,
    pub body_style: BTreeMap<String, String>,
    pub scroll_y: f64,
    pub viewport_width: f64,
    pub active: Option<NodeId>,
    /// Currently bound listeners, duplicates included.
    pub bound: Vec<ListenerKind>,
    pub bind_calls: usize,
    pub fail_bind: Option<ListenerKind>,
    pub timers: Vec<(u32, DeferredTask)>,
    pub announced: Vec<DrawerEvent>,
    pub attached: Option<(NodeId, NodeId)>,
    pub clock_ms: f64,
    pub log: Vec<String>,
}

/// Ids of the elements in [`FakeHost::page`].
pub struct Page {
    pub container: NodeId,
    pub links: NodeId,
    pub anchors: Vec<NodeId>,
    pub main: NodeId,
}

impl FakeHost {
    pub fn new() -> Self {
        let body = FakeNode {
            tag: "body".into(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            parent: None,
            removed: false,
        };
        Self { nodes: vec![body], viewport_width: 375.0, clock_ms: 1_000.0, ..Self::default() }
    }

    /// `.nav-container` without a toggle, `.nav-links` with three anchors,
    /// and a `main` element outside the navigation.
    pub fn page() -> (Self, Page) {
        let mut host = Self::new();
        let header = host.add(BODY, "header", &["site-header"]);
        let container = host.add(header, "div", &["nav-container"]);
        let links = host.add(container, "ul", &["nav-links"]);
        let anchors = ["/", "/about", "/contact"]
            .iter()
            .map(|href| {
                let item = host.add(links, "li", &[]);
                let anchor = host.add(item, "a", &[]);
                host.nodes[anchor].attributes.insert("href".into(), (*href).into());
                anchor
            })
            .collect();
        let main = host.add(BODY, "main", &[]);
        (host, Page { container, links, anchors, main })
    }

    pub fn add(&mut self, parent: NodeId, tag: &str, classes: &[&str]) -> NodeId {
        self.nodes.push(FakeNode {
            tag: tag.into(),
            classes: classes.iter().map(|c| (*c).to_owned()).collect(),
            attributes: BTreeMap::new(),
            parent: Some(parent),
            removed: false,
        });
        self.nodes.len() - 1
    }

    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        (0..self.nodes.len()).filter(|id| self.is_live(*id) && self.nodes[*id].parent == Some(parent)).collect()
    }

    pub fn is_live(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if self.nodes[current].removed {
                return false;
            }
            cursor = self.nodes[current].parent;
        }
        true
    }

    pub fn count_bound(&self, kind: ListenerKind) -> usize {
        self.bound.iter().filter(|k| **k == kind).count()
    }

    pub fn take_timers(&mut self) -> Vec<DeferredTask> {
        self.timers.drain(..).map(|(_, task)| task).collect()
    }

    fn matches(&self, id: NodeId, selector: &str) -> bool {
        selector.split(',').map(str::trim).any(|part| match part.strip_prefix('.') {
            Some(class) => self.nodes[id].classes.iter().any(|c| c == class),
            None => self.nodes[id].tag == part,
        })
    }
}

impl DrawerHost for FakeHost {
    type Node = NodeId;

    fn query(&self, selector: &str) -> Option<NodeId> {
        (0..self.nodes.len()).find(|id| self.is_live(*id) && self.matches(*id, selector))
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut cursor = Some(*node);
        while let Some(current) = cursor {
            if current == *ancestor {
                return true;
            }
            cursor = self.nodes[current].parent;
        }
        false
    }

    fn focusables(&self, root: &NodeId) -> Vec<NodeId> {
        (0..self.nodes.len())
            .filter(|id| *id != *root && self.is_live(*id) && self.contains(root, id))
            .filter(|id| {
                let node = &self.nodes[*id];
                node.tag == "button" || (node.tag == "a" && node.attributes.contains_key("href"))
            })
            .collect()
    }

    fn create_toggle(&mut self, container: &NodeId, markup: &ToggleMarkup) -> Result<NodeId, DrawerError> {
        let classes: Vec<&str> = markup.class.split_whitespace().collect();
        let button = self.add(*container, "button", &classes);
        for (name, value) in [
            ("type", "button"),
            ("aria-label", markup.label.as_str()),
            ("aria-expanded", "false"),
            ("aria-controls", markup.controls.as_str()),
        ] {
            self.nodes[button].attributes.insert(name.into(), value.into());
        }
        for _ in 0..markup.lines {
            let line = self.add(button, "span", &[markup.line_class.as_str()]);
            self.nodes[line].attributes.insert("aria-hidden".into(), "true".into());
        }
        self.log.push(format!("create toggle {button}"));
        Ok(button)
    }

    fn create_backdrop(&mut self, class: &str) -> Result<NodeId, DrawerError> {
        let backdrop = self.add(BODY, "div", &[class]);
        self.log.push(format!("create backdrop {backdrop}"));
        Ok(backdrop)
    }

    fn remove(&mut self, node: &NodeId) {
        self.nodes[*node].removed = true;
        self.log.push(format!("remove {node}"));
    }

    fn add_class(&mut self, node: &NodeId, class: &str) -> Result<(), DrawerError> {
        if !self.has_class(node, class) {
            self.nodes[*node].classes.push(class.into());
        }
        Ok(())
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) -> Result<(), DrawerError> {
        self.nodes[*node].classes.retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes[*node].classes.iter().any(|c| c == class)
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes[*node].attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) -> Result<(), DrawerError> {
        self.nodes[*node].attributes.insert(name.into(), value.into());
        Ok(())
    }

    fn remove_attribute(&mut self, node: &NodeId, name: &str) {
        self.nodes[*node].attributes.remove(name);
    }

    fn body_style(&self, property: &str) -> String {
        self.body_style.get(property).cloned().unwrap_or_default()
    }

    fn set_body_style(&mut self, property: &str, value: &str) -> Result<(), DrawerError> {
        if value.is_empty() {
            self.body_style.remove(property);
        } else {
            self.body_style.insert(property.into(), value.into());
        }
        self.log.push(format!("style {property}={value}"));
        Ok(())
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
        self.log.push(format!("scroll_to {y}"));
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    fn focus(&mut self, node: &NodeId) {
        self.active = Some(*node);
    }

    fn attach(&mut self, toggle: &NodeId, links: &NodeId) {
        self.attached = Some((*toggle, *links));
    }

    fn bind(&mut self, kind: ListenerKind) -> Result<(), DrawerError> {
        self.bind_calls += 1;
        if self.fail_bind == Some(kind) {
            return Err(DrawerError::Dom(format!("cannot bind {kind:?}")));
        }
        self.bound.push(kind);
        Ok(())
    }

    fn unbind(&mut self, kind: ListenerKind) {
        if let Some(pos) = self.bound.iter().position(|k| *k == kind) {
            self.bound.remove(pos);
        }
    }

    fn schedule(&mut self, delay_ms: u32, task: DeferredTask) {
        self.timers.push((delay_ms, task));
    }

    fn now_ms(&self) -> f64 {
        self.clock_ms
    }

    fn announce(&mut self, event: &DrawerEvent) {
        self.announced.push(event.clone());
    }
}
