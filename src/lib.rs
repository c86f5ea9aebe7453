//! Mobile navigation drawer for the marketing site.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! drawer's open/closed state and everything that hangs off it: active
//! markers on the toggle and links list, the backdrop, body scroll lock,
//! focus containment and the listeners that close the drawer (escape, outside
//! press, link click, wide viewport, hidden page). The page supplies markup
//! and CSS only.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`controller`] | [`controller::DrawerController`], the drawer itself |
//! | [`state`] | Two-state machine and its transition table |
//! | [`host`] | [`host::DrawerHost`] DOM adapter trait and inbound [`host::DomEvent`]s |
//! | [`listeners`] | Listener kinds and the at-most-once [`listeners::ListenerSet`] |
//! | [`scroll_lock`] | Body pinning that restores only what it set |
//! | [`focus_trap`] | Tab wrap-around inside the open drawer |
//! | [`notify`] | Open/close notifications for sibling components |
//! | [`config`] | [`config::DrawerConfig`] selectors, classes, breakpoint, timings |
//! | [`report`] | Advisory error reports written to the `log` facade |
//! | [`error`] | [`error::DrawerError`] |
//! | `web` | `web-sys` host and the `NavDrawer` JS binding (feature `hydrate`) |

pub mod config;
pub mod controller;
pub mod error;
pub mod focus_trap;
pub mod host;
pub mod listeners;
pub mod notify;
pub mod report;
pub mod scroll_lock;
pub mod state;
#[cfg(feature = "hydrate")]
pub mod web;

#[cfg(test)]
mod fake_host;
