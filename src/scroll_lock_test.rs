#![allow(clippy::float_cmp)]

use super::*;
use crate::fake_host::FakeHost;

#[test]
fn acquire_pins_body_at_offset() {
    let mut host = FakeHost::new();
    let lock = ScrollLock::acquire(&mut host, 420.0);
    assert_eq!(host.body_style("overflow"), "hidden");
    assert_eq!(host.body_style("position"), "fixed");
    assert_eq!(host.body_style("top"), "-420px");
    assert_eq!(host.body_style("width"), "100%");
    assert_eq!(lock.scroll_y(), 420.0);
}

#[test]
fn release_restores_prior_inline_values() {
    let mut host = FakeHost::new();
    host.body_style.insert("overflow".into(), "scroll".into());
    host.body_style.insert("width".into(), "90vw".into());
    let lock = ScrollLock::acquire(&mut host, 10.0);
    lock.release(&mut host);

    assert_eq!(host.body_style("overflow"), "scroll");
    assert_eq!(host.body_style("width"), "90vw");
    assert_eq!(host.body_style("position"), "");
    assert_eq!(host.body_style("top"), "");
}

#[test]
fn release_scrolls_after_unpinning() {
    let mut host = FakeHost::new();
    let lock = ScrollLock::acquire(&mut host, 75.0);
    host.scroll_y = 0.0;
    host.log.clear();
    lock.release(&mut host);

    assert_eq!(host.log.last().map(String::as_str), Some("scroll_to 75"));
    assert_eq!(host.scroll_y, 75.0);
}

#[test]
fn unrelated_properties_are_untouched() {
    let mut host = FakeHost::new();
    host.body_style.insert("background-color".into(), "#111".into());
    let lock = ScrollLock::acquire(&mut host, 0.0);
    host.body_style.insert("color".into(), "#eee".into());
    lock.release(&mut host);
    assert_eq!(host.body_style("background-color"), "#111");
    assert_eq!(host.body_style("color"), "#eee");
}
