use super::*;
use crate::fake_host::FakeHost;

#[test]
fn kinds_map_to_dom_events() {
    assert_eq!(ListenerKind::OutsidePress.event_name(), "click");
    assert_eq!(ListenerKind::EscapeKey.event_name(), "keydown");
    assert_eq!(ListenerKind::FocusTrap.event_name(), "keydown");
    assert_eq!(ListenerKind::OrientationChange.event_name(), "orientationchange");
    assert_eq!(ListenerKind::Visibility.event_name(), "visibilitychange");
}

#[test]
fn kinds_map_to_targets() {
    assert_eq!(ListenerKind::ToggleKey.target(), ListenerTarget::Toggle);
    assert_eq!(ListenerKind::LinkClick.target(), ListenerTarget::Links);
    assert_eq!(ListenerKind::OutsidePress.target(), ListenerTarget::Document);
    assert_eq!(ListenerKind::Resize.target(), ListenerTarget::Window);
}

#[test]
fn only_toggle_and_link_listeners_are_permanent() {
    let permanent: Vec<_> = ListenerKind::ALL.into_iter().filter(|k| k.lifetime() == Lifetime::Permanent).collect();
    assert_eq!(permanent, vec![ListenerKind::ToggleClick, ListenerKind::ToggleKey, ListenerKind::LinkClick]);
}

#[test]
fn binding_twice_reaches_host_once() {
    let mut host = FakeHost::new();
    let mut set = ListenerSet::new();
    set.bind(&mut host, ListenerKind::EscapeKey).unwrap();
    set.bind(&mut host, ListenerKind::EscapeKey).unwrap();
    assert_eq!(host.bind_calls, 1);
    assert_eq!(host.count_bound(ListenerKind::EscapeKey), 1);
    assert_eq!(set.len(), 1);
}

#[test]
fn failed_bind_is_not_recorded() {
    let mut host = FakeHost::new();
    host.fail_bind = Some(ListenerKind::Resize);
    let mut set = ListenerSet::new();
    assert!(set.bind(&mut host, ListenerKind::Resize).is_err());
    assert!(!set.contains(ListenerKind::Resize));
    assert!(set.is_empty());
}

#[test]
fn unbind_while_open_keeps_permanent_listeners() {
    let mut host = FakeHost::new();
    let mut set = ListenerSet::new();
    for kind in ListenerKind::ALL {
        set.bind(&mut host, kind).unwrap();
    }
    assert_eq!(set.while_open_count(), 6);

    set.unbind_while_open(&mut host);
    assert_eq!(set.while_open_count(), 0);
    assert_eq!(set.len(), 3);
    assert_eq!(host.bound.len(), 3);
}

#[test]
fn unbind_all_empties_host() {
    let mut host = FakeHost::new();
    let mut set = ListenerSet::new();
    for kind in ListenerKind::ALL {
        set.bind(&mut host, kind).unwrap();
    }
    set.unbind_all(&mut host);
    assert!(set.is_empty());
    assert!(host.bound.is_empty());
}

#[test]
fn unbinding_unknown_kind_does_not_touch_host() {
    let mut host = FakeHost::new();
    host.bound.push(ListenerKind::Resize);
    let mut set = ListenerSet::new();
    set.unbind(&mut host, ListenerKind::Resize);
    assert_eq!(host.bound, vec![ListenerKind::Resize]);
}
