use super::*;

#[test]
fn empty_list_never_traps() {
    assert_eq!(wrap_target(0, None, false), None);
    assert_eq!(wrap_target(0, None, true), None);
}

#[test]
fn tab_on_last_wraps_to_first() {
    assert_eq!(wrap_target(3, Some(2), false), Some(0));
}

#[test]
fn shift_tab_on_first_wraps_to_last() {
    assert_eq!(wrap_target(3, Some(0), true), Some(2));
}

#[test]
fn tab_in_the_middle_is_left_to_the_browser() {
    assert_eq!(wrap_target(3, Some(0), false), None);
    assert_eq!(wrap_target(3, Some(1), false), None);
    assert_eq!(wrap_target(3, Some(1), true), None);
    assert_eq!(wrap_target(3, Some(2), true), None);
}

#[test]
fn focus_outside_is_pulled_back_in() {
    assert_eq!(wrap_target(3, None, false), Some(0));
    assert_eq!(wrap_target(3, None, true), Some(2));
}

#[test]
fn single_element_keeps_focus() {
    assert_eq!(wrap_target(1, Some(0), false), Some(0));
    assert_eq!(wrap_target(1, Some(0), true), Some(0));
}
