use std::cell::Cell;

use super::*;

#[test]
fn tracker_maps_start_start_to_end_end() {
    // 400vh region in an 800px viewport.
    let mut t = ScrollTracker::viewport_multiple(4.0, 800.0);
    assert_eq!(t.scroll_span(), 2400.0);
    assert_eq!(t.progress(), 0.0);
    t.set_scroll_y(1200.0);
    assert_eq!(t.progress(), 0.5);
    t.set_scroll_y(2400.0);
    assert_eq!(t.progress(), 1.0);
    t.set_scroll_y(5000.0);
    assert_eq!(t.progress(), 1.0);
    t.set_scroll_y(-30.0);
    assert_eq!(t.progress(), 0.0);
}

#[test]
fn tracker_honours_region_offset() {
    let mut t = ScrollTracker::new(100.0, 1100.0, 100.0);
    t.set_scroll_y(100.0);
    assert_eq!(t.progress(), 0.0);
    t.set_scroll_y(600.0);
    assert_eq!(t.progress(), 0.5);
    assert_eq!(t.scroll_y_for(0.5), 600.0);
}

#[test]
fn short_region_steps_between_ends() {
    let mut t = ScrollTracker::new(50.0, 300.0, 600.0);
    t.set_scroll_y(10.0);
    assert_eq!(t.progress(), 0.0);
    t.set_scroll_y(50.0);
    assert_eq!(t.progress(), 1.0);
}

#[test]
fn closures_are_sources() {
    let raw = Cell::new(0.25);
    let src = || raw.get();
    assert_eq!(src.progress(), 0.25);
    raw.set(0.75);
    assert_eq!(src.progress(), 0.75);
}
