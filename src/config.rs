//! Drawer configuration.
//!
//! DESIGN
//! ======
//! Every field has a default so a host page can boot the drawer with no
//! configuration at all, or pass a partial JSON object overriding only what
//! differs from the stock markup.

use serde::{Deserialize, Serialize};

use crate::error::DrawerError;
use crate::report::{Severity, handle_error};

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_BREAKPOINT_PX: f64 = 768.0;
pub const DEFAULT_ORIENTATION_SETTLE_MS: u32 = 200;

/// Dimming overlay shown behind the open drawer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropConfig {
    /// Class given to the overlay element on creation.
    pub class: String,
    /// Class present while the drawer is open.
    pub visible_class: String,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self { class: "nav-backdrop".into(), visible_class: "nav-backdrop--visible".into() }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    /// Element the toggle button lives in (created there when absent).
    pub container_selector: String,
    /// List of navigable links shown inside the drawer.
    pub links_selector: String,
    /// Existing toggle button, if the page ships one.
    pub toggle_selector: String,
    /// Classes given to a toggle button the controller creates.
    pub toggle_class: String,
    /// Classes on the toggle while open.
    pub toggle_active_classes: Vec<String>,
    /// Classes on the links list while open.
    pub links_active_classes: Vec<String>,
    /// `None` disables the overlay entirely.
    pub backdrop: Option<BackdropConfig>,
    /// Viewports wider than this are "desktop" and force the drawer closed.
    pub breakpoint_px: f64,
    pub orientation_settle_ms: u32,
    /// Delay before the outside-press listener is armed after opening.
    pub outside_press_arm_ms: u32,
    /// Close this long after a link click instead of immediately.
    pub link_close_delay_ms: Option<u32>,
    pub trap_focus: bool,
    /// Close when the tab is hidden (tab switch, app switch).
    pub close_on_hidden: bool,
    pub toggle_label: String,
    pub links_label: String,
    /// Id assigned to the links list when it has none, for `aria-controls`.
    pub links_id: String,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            container_selector: ".nav-container, .nav__content".into(),
            links_selector: ".nav-links, .nav__list".into(),
            toggle_selector: ".menu-toggle, .nav__toggle".into(),
            toggle_class: "btn btn--menu-toggle menu-toggle nav__toggle".into(),
            toggle_active_classes: vec!["active".into(), "is-active".into()],
            links_active_classes: vec!["active".into(), "nav__list--active".into()],
            backdrop: Some(BackdropConfig::default()),
            breakpoint_px: DEFAULT_BREAKPOINT_PX,
            orientation_settle_ms: DEFAULT_ORIENTATION_SETTLE_MS,
            outside_press_arm_ms: 0,
            link_close_delay_ms: None,
            trap_focus: true,
            close_on_hidden: true,
            toggle_label: "Toggle navigation menu".into(),
            links_label: "Main navigation".into(),
            links_id: "navigation-menu".into(),
        }
    }
}

impl DrawerConfig {
    /// Decode a (possibly partial) JSON object and validate it.
    pub fn from_json(raw: &str) -> Result<Self, DrawerError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Decode page-supplied JSON, falling back to defaults (with a logged
    /// report) when it is absent or unusable.
    #[must_use]
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(err) => {
                handle_error(&err, "DrawerConfig::from_json", Severity::Medium);
                Self::default()
            }
        }
    }

    /// Reject values the controller cannot work with.
    pub fn validate(&self) -> Result<(), DrawerError> {
        if !self.breakpoint_px.is_finite() || self.breakpoint_px <= 0.0 {
            return Err(DrawerError::InvalidConfig(format!(
                "breakpoint_px must be a positive number, got {}",
                self.breakpoint_px
            )));
        }
        for (name, selector) in [
            ("container_selector", &self.container_selector),
            ("links_selector", &self.links_selector),
            ("toggle_selector", &self.toggle_selector),
        ] {
            if selector.trim().is_empty() {
                return Err(DrawerError::InvalidConfig(format!("{name} must not be empty")));
            }
        }
        check_class_list("toggle_active_classes", &self.toggle_active_classes)?;
        check_class_list("links_active_classes", &self.links_active_classes)?;
        if let Some(backdrop) = &self.backdrop {
            check_class_token("backdrop.class", &backdrop.class)?;
            check_class_token("backdrop.visible_class", &backdrop.visible_class)?;
        }
        if self.links_id.trim().is_empty() || self.links_id.contains(char::is_whitespace) {
            return Err(DrawerError::InvalidConfig(format!("links_id is not a valid id: {:?}", self.links_id)));
        }
        Ok(())
    }

    /// True when `width` is on the desktop side of the breakpoint.
    #[must_use]
    pub fn is_wide(&self, width: f64) -> bool {
        width > self.breakpoint_px
    }
}

fn check_class_list(name: &str, classes: &[String]) -> Result<(), DrawerError> {
    if classes.is_empty() {
        return Err(DrawerError::InvalidConfig(format!("{name} needs at least one class")));
    }
    classes.iter().try_for_each(|class| check_class_token(name, class))
}

fn check_class_token(name: &str, value: &str) -> Result<(), DrawerError> {
    if value.is_empty() || value.contains(char::is_whitespace) {
        return Err(DrawerError::InvalidConfig(format!("{name} must be a single class name, got {value:?}")));
    }
    Ok(())
}
