use super::*;
use crate::foundation::core::FrameIndex;

#[test]
fn file_names_are_zero_padded() {
    let g = FramePathGenerator::new("/renders", "depth", 4, "exr").unwrap();
    assert_eq!(g.file_name(7), "depth_0007.exr");
    assert_eq!(g.file_name(123456), "depth_123456.exr");

    let unpadded = FramePathGenerator::new("/renders", "depth", 0, "png").unwrap();
    assert_eq!(unpadded.file_name(7), "depth_7.png");
}

#[test]
fn paths_are_absolute_and_follow_the_session_frame() {
    let g = FramePathGenerator::new("relative/out", "normal", 3, "png").unwrap();
    let mut session = RecordingSession::default();
    session.seek(FrameIndex(12));
    let p = g.build_absolute_path(&session).unwrap();
    assert!(p.is_absolute());
    assert!(p.ends_with("relative/out/normal_012.png"));
}

#[test]
fn empty_stem_is_rejected() {
    let err = FramePathGenerator::new("/renders", "", 4, "exr").unwrap_err();
    assert!(matches!(err, RecorderError::Configuration(_)));
}

#[test]
fn create_directory_makes_nested_dirs() {
    let root = tempfile::tempdir().unwrap();
    let g = FramePathGenerator::new(root.path().join("a").join("b"), "x", 2, "jpg").unwrap();
    g.create_directory(&RecordingSession::default()).unwrap();
    assert!(root.path().join("a").join("b").is_dir());
    // idempotent
    g.create_directory(&RecordingSession::default()).unwrap();
}
