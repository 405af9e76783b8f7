use super::*;

#[test]
fn frame_index_clamps_and_slots() {
    assert_eq!(FrameIndex(0).clamp_to(40), FrameIndex(1));
    assert_eq!(FrameIndex(41).clamp_to(40), FrameIndex(40));
    assert_eq!(FrameIndex(7).clamp_to(0), FrameIndex::FIRST);
    assert_eq!(FrameIndex(1).slot(), Some(0));
    assert_eq!(FrameIndex(0).slot(), None);
}

#[test]
fn viewport_rejects_degenerate_values() {
    assert!(Viewport::new(800.0, 600.0, 2.0).is_ok());
    assert!(Viewport::new(0.0, 600.0, 1.0).is_err());
    assert!(Viewport::new(800.0, f64::NAN, 1.0).is_err());
    assert!(Viewport::new(800.0, 600.0, -1.0).is_err());
}

#[test]
fn device_size_scales_by_dpr() {
    let vp = Viewport::new(800.0, 600.0, 2.0).unwrap();
    assert_eq!(vp.device_size(), (1600, 1200));
    let vp = Viewport::new(375.0, 667.0, 1.5).unwrap();
    assert_eq!(vp.device_size(), (563, 1001));
}

#[test]
fn clamp_unit_handles_nan_and_bounds() {
    assert_eq!(clamp_unit(f64::NAN), 0.0);
    assert_eq!(clamp_unit(-0.5), 0.0);
    assert_eq!(clamp_unit(1.5), 1.0);
    assert_eq!(clamp_unit(0.25), 0.25);
}
