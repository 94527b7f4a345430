//! Integration tests for the virtual line scroller.

use std::time::{Duration, Instant};
use textquill::render::scroll::VirtualScroller;
use textquill::render::{SCROLL_BUFFER_LINES, VIRTUAL_LINE_THRESHOLD};

#[test]
fn test_threshold_selects_strategy() {
    assert!(!VirtualScroller::new(VIRTUAL_LINE_THRESHOLD).is_virtual());
    assert!(VirtualScroller::new(VIRTUAL_LINE_THRESHOLD + 1).is_virtual());
}

#[test]
fn test_five_thousand_line_midpoint_window() {
    // Scrolling a 5000-line document to the midpoint renders a window of
    // buffer*2 + viewport lines, not all 5000
    let scroller = VirtualScroller::new(5000);
    let viewport_lines = 40.0;

    let window = scroller.compute_window(2500.0, viewport_lines);
    assert_eq!(window.len(), SCROLL_BUFFER_LINES * 2 + viewport_lines as usize);
    assert!(window.start_line > 2400 && window.end_line < 2600);
    assert!(window.contains(2500));
}

#[test]
fn test_window_bounds_invariant() {
    let scroller = VirtualScroller::new(1200);
    for step in 0..200 {
        let scroll_top = step as f64 * 17.3;
        let window = scroller.compute_window(scroll_top, 33.0);
        assert!(window.start_line <= window.end_line);
        assert!(window.end_line <= 1200);
    }
}

#[test]
fn test_identical_scroll_state_is_noop() {
    let mut scroller = VirtualScroller::new(5000);
    let t0 = Instant::now();

    let first = scroller.on_scroll(320.0, 40.0, t0);
    assert!(first.is_some());

    // Re-invoking with identical scroll state after the throttle window
    // produces no re-render
    for i in 1..5 {
        let t = t0 + Duration::from_millis(20 * i);
        assert_eq!(scroller.on_scroll(320.0, 40.0, t), None);
    }
    assert_eq!(scroller.last_window(), first);
}

#[test]
fn test_burst_coalesced_last_write_wins() {
    let mut scroller = VirtualScroller::new(5000);
    let t0 = Instant::now();

    scroller.on_scroll(0.0, 40.0, t0).unwrap();

    // A burst of scroll events inside one throttle interval: all dropped
    for (ms, pos) in [(2u64, 100.0), (6, 700.0), (12, 1500.0)] {
        assert_eq!(
            scroller.on_scroll(pos, 40.0, t0 + Duration::from_millis(ms)),
            None
        );
    }

    // The next recompute reflects only the latest position
    let window = scroller
        .on_scroll(1500.0, 40.0, t0 + Duration::from_millis(40))
        .unwrap();
    assert!(window.contains(1500));
    assert!(!window.contains(100));
}

#[test]
fn test_content_height_reflects_true_size() {
    let scroller = VirtualScroller::new(5000).with_line_height(18.0);
    assert_eq!(scroller.content_height(), 5000.0 * 18.0);

    let window = scroller.compute_window(0.0, 540.0);
    assert_eq!(scroller.offset_for(window), 0.0);

    let window = scroller.compute_window(9000.0, 540.0);
    assert_eq!(
        scroller.offset_for(window),
        window.start_line as f64 * 18.0
    );
}

#[test]
fn test_scroll_past_end_clamps() {
    let scroller = VirtualScroller::new(1100);
    let window = scroller.compute_window(1_000_000.0, 40.0);
    assert_eq!(window.start_line, 1100);
    assert_eq!(window.end_line, 1100);
    assert!(window.is_empty());
}
