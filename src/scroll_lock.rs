//! Body scroll lock.
//!
//! The body is pinned with `position: fixed` offset by the current scroll
//! position so the page does not jump while the drawer covers it. Only the
//! four properties written here are saved and restored; other inline styles
//! on `body` belong to other code (the theme switch writes there too).

use crate::host::DrawerHost;
use crate::report::{Severity, handle_error};

#[cfg(test)]
#[path = "scroll_lock_test.rs"]
mod scroll_lock_test;

/// Prior inline values of the pinned properties plus the captured offset.
#[derive(Clone, Debug, PartialEq)]
pub struct ScrollLock {
    saved: Vec<(&'static str, String)>,
    scroll_y: f64,
}

impl ScrollLock {
    /// Pin the body at `scroll_y`.
    pub fn acquire<H: DrawerHost>(host: &mut H, scroll_y: f64) -> Self {
        let pinned = [
            ("overflow", "hidden".to_owned()),
            ("position", "fixed".to_owned()),
            ("top", format!("-{scroll_y}px")),
            ("width", "100%".to_owned()),
        ];
        let mut saved = Vec::with_capacity(pinned.len());
        for (property, value) in pinned {
            saved.push((property, host.body_style(property)));
            if let Err(err) = host.set_body_style(property, &value) {
                handle_error(&err, "ScrollLock::acquire", Severity::Medium);
            }
        }
        Self { saved, scroll_y }
    }

    /// Unpin the body, then scroll back to the captured offset.
    pub fn release<H: DrawerHost>(self, host: &mut H) {
        for (property, prior) in self.saved.iter().rev() {
            if let Err(err) = host.set_body_style(property, prior) {
                handle_error(&err, "ScrollLock::release", Severity::Medium);
            }
        }
        host.scroll_to(self.scroll_y);
    }

    /// Offset captured when the lock was taken.
    #[must_use]
    pub fn scroll_y(&self) -> f64 {
        self.scroll_y
    }
}
