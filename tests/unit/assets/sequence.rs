use super::*;

#[test]
fn default_matches_shipped_frames() {
    let spec = FrameSequenceSpec::default();
    assert_eq!(spec.count, 40);
    assert_eq!(spec.file_name(FrameIndex(1)), "ezgif-frame-001.jpg");
    assert_eq!(spec.relative_path(FrameIndex(40)), "/images/ezgif-frame-040.jpg");
}

#[test]
fn relative_path_handles_trailing_and_empty_dirs() {
    let mut spec = FrameSequenceSpec {
        count: 3,
        directory: "frames/".to_string(),
        prefix: "f".to_string(),
        extension: ".png".to_string(),
    };
    assert_eq!(spec.relative_path(FrameIndex(2)), "frames/f002.png");
    spec.directory.clear();
    assert_eq!(spec.relative_path(FrameIndex(3)), "f003.png");
}

#[test]
fn validate_bounds_count() {
    let mut spec = FrameSequenceSpec::default();
    assert!(spec.validate().is_ok());
    spec.count = 0;
    assert!(spec.validate().is_err());
    spec.count = 1000;
    assert!(spec.validate().is_err());
}

#[test]
fn indices_are_one_based() {
    let spec = FrameSequenceSpec {
        count: 3,
        ..FrameSequenceSpec::default()
    };
    let got: Vec<u32> = spec.indices().map(|i| i.0).collect();
    assert_eq!(got, vec![1, 2, 3]);
}
