//! Unit tests for mouse report serialization and motion splitting.
//!
//! These tests run on the host (not embedded) and verify the pure
//! logic that turns session output into USB HID reports.

use super::mouse::{split_motion, MouseReport, MAX_REPORT_DELTA, MOUSE_REPORT_SIZE};

// ═══════════════════════════════════════════════════════════════════════════
// Mouse Report Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mouse_report_default_is_idle() {
    let report = MouseReport::default();
    assert!(report.is_idle());
    assert_eq!(report.buttons, 0);
}

#[test]
fn mouse_report_motion_has_no_buttons() {
    let report = MouseReport::motion(10, -5, 2);
    assert_eq!(report.buttons, 0);
    assert_eq!(report.x, 10);
    assert_eq!(report.y, -5);
    assert_eq!(report.wheel, 2);
    assert!(!report.is_idle());
}

#[test]
fn mouse_report_serialize_signed_fields() {
    let report = MouseReport::motion(-10, 20, -3);
    let mut buf = [0u8; 4];
    let written = report.serialize(&mut buf);

    assert_eq!(written, MOUSE_REPORT_SIZE);
    assert_eq!(buf, [0x00, 0xF6, 0x14, 0xFD]);
}

#[test]
fn mouse_report_serialize_buffer_too_small() {
    let report = MouseReport::motion(1, 1, 1);
    let mut buf = [0u8; 2];
    assert_eq!(report.serialize(&mut buf), 0);
    assert_eq!(buf, [0, 0]); // untouched
}

// ═══════════════════════════════════════════════════════════════════════════
// Motion Splitting Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn split_zero_motion_yields_nothing() {
    assert_eq!(split_motion(0, 0, 0).count(), 0);
}

#[test]
fn split_small_motion_is_single_report() {
    let reports: heapless::Vec<MouseReport, 4> = split_motion(100, 100, 0).collect();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0], MouseReport::motion(100, 100, 0));
}

#[test]
fn split_large_wheel_sums_to_request() {
    // Fast spin at 5x: 5 ticks * 10 * 5 = 250 wheel units.
    let reports: heapless::Vec<MouseReport, 4> = split_motion(0, 0, -250).collect();
    assert_eq!(reports.len(), 2);
    let total: i32 = reports.iter().map(|r| r.wheel as i32).sum();
    assert_eq!(total, -250);
    assert!(reports
        .iter()
        .all(|r| (r.wheel as i32).abs() <= MAX_REPORT_DELTA));
}

#[test]
fn split_mixed_axes_finish_independently() {
    let reports: heapless::Vec<MouseReport, 4> = split_motion(200, -20, 0).collect();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0], MouseReport::motion(127, -20, 0));
    assert_eq!(reports[1], MouseReport::motion(73, 0, 0));
}

#[test]
fn split_never_emits_minus_128() {
    let reports: heapless::Vec<MouseReport, 4> = split_motion(-128, 0, 0).collect();
    assert_eq!(reports[0].x, -127);
    assert_eq!(reports[1].x, -1);
}
