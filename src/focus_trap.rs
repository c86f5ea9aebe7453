//! Tab containment inside the open drawer.

#[cfg(test)]
#[path = "focus_trap_test.rs"]
mod focus_trap_test;

/// Index to focus for a Tab press, or `None` to let the browser move focus.
///
/// `active` is the position of the focused element among the `len`
/// focusable elements, `None` when focus is elsewhere on the page.
#[must_use]
pub fn wrap_target(len: usize, active: Option<usize>, shift: bool) -> Option<usize> {
    let last = len.checked_sub(1)?;
    match active {
        None => Some(if shift { last } else { 0 }),
        Some(0) if shift => Some(last),
        Some(i) if !shift && i >= last => Some(0),
        Some(_) => None,
    }
}
