//! Listener registry.
//!
//! Every DOM listener the drawer ever installs has a [`ListenerKind`]. The
//! controller only binds through a [`ListenerSet`], so a kind is bound at most
//! once and a close transition can drop every while-open kind in one call.

use std::collections::BTreeSet;

use crate::error::DrawerError;
use crate::host::DrawerHost;

#[cfg(test)]
#[path = "listeners_test.rs"]
mod listeners_test;

/// How long a listener stays bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lifetime {
    /// Bound at mount, removed by `destroy()`.
    Permanent,
    /// Bound on open, removed on close.
    WhileOpen,
}

/// Where a listener is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListenerTarget {
    Toggle,
    Links,
    Document,
    Window,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    ToggleClick,
    /// Enter / Space on the toggle button.
    ToggleKey,
    /// Delegated click on anchors inside the links list.
    LinkClick,
    EscapeKey,
    OutsidePress,
    Resize,
    OrientationChange,
    /// Tab / Shift+Tab containment inside the links list.
    FocusTrap,
    Visibility,
}

impl ListenerKind {
    pub const ALL: [Self; 9] = [
        Self::ToggleClick,
        Self::ToggleKey,
        Self::LinkClick,
        Self::EscapeKey,
        Self::OutsidePress,
        Self::Resize,
        Self::OrientationChange,
        Self::FocusTrap,
        Self::Visibility,
    ];

    /// DOM event type this listener subscribes to.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Self::ToggleClick | Self::LinkClick | Self::OutsidePress => "click",
            Self::ToggleKey | Self::EscapeKey | Self::FocusTrap => "keydown",
            Self::Resize => "resize",
            Self::OrientationChange => "orientationchange",
            Self::Visibility => "visibilitychange",
        }
    }

    #[must_use]
    pub fn target(self) -> ListenerTarget {
        match self {
            Self::ToggleClick | Self::ToggleKey => ListenerTarget::Toggle,
            Self::LinkClick => ListenerTarget::Links,
            Self::EscapeKey | Self::OutsidePress | Self::FocusTrap | Self::Visibility => ListenerTarget::Document,
            Self::Resize | Self::OrientationChange => ListenerTarget::Window,
        }
    }

    #[must_use]
    pub fn lifetime(self) -> Lifetime {
        match self {
            Self::ToggleClick | Self::ToggleKey | Self::LinkClick => Lifetime::Permanent,
            _ => Lifetime::WhileOpen,
        }
    }
}

/// Kinds currently bound on the host.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListenerSet {
    bound: BTreeSet<ListenerKind>,
}

impl ListenerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `kind` unless it is already bound.
    pub fn bind<H: DrawerHost>(&mut self, host: &mut H, kind: ListenerKind) -> Result<(), DrawerError> {
        if self.bound.contains(&kind) {
            return Ok(());
        }
        host.bind(kind)?;
        self.bound.insert(kind);
        Ok(())
    }

    pub fn unbind<H: DrawerHost>(&mut self, host: &mut H, kind: ListenerKind) {
        if self.bound.remove(&kind) {
            host.unbind(kind);
        }
    }

    /// Drop every while-open listener.
    pub fn unbind_while_open<H: DrawerHost>(&mut self, host: &mut H) {
        let kinds: Vec<_> = self.bound.iter().copied().filter(|k| k.lifetime() == Lifetime::WhileOpen).collect();
        for kind in kinds {
            self.unbind(host, kind);
        }
    }

    pub fn unbind_all<H: DrawerHost>(&mut self, host: &mut H) {
        for kind in std::mem::take(&mut self.bound) {
            host.unbind(kind);
        }
    }

    #[must_use]
    pub fn contains(&self, kind: ListenerKind) -> bool {
        self.bound.contains(&kind)
    }

    /// Number of bound while-open listeners.
    #[must_use]
    pub fn while_open_count(&self) -> usize {
        self.bound.iter().filter(|k| k.lifetime() == Lifetime::WhileOpen).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}
