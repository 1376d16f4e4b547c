use super::*;
use crate::foundation::error::RecorderError;

#[test]
fn write_next_consumes_the_oldest_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut q = PendingPathQueue::new();
    q.push(FrameIndex(0), dir.path().join("f0.png"));
    q.push(FrameIndex(1), dir.path().join("f1.png"));

    let w = FileWriter::new();
    let first = w.write_next(&mut q, b"zero").unwrap();
    assert_eq!(first.frame, FrameIndex(0));
    assert_eq!(first.bytes, 4);
    assert_eq!(std::fs::read(dir.path().join("f0.png")).unwrap(), b"zero");
    assert!(!dir.path().join("f1.png").exists());
    assert_eq!(q.len(), 1);
}

#[test]
fn write_next_on_empty_queue_is_fatal() {
    let mut q = PendingPathQueue::new();
    let err = FileWriter::new().write_next(&mut q, b"x").unwrap_err();
    assert!(matches!(err, RecorderError::Pipeline(_)));
    assert!(err.is_fatal());
}

#[test]
fn existing_files_are_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("f.jpg");
    std::fs::write(&target, b"old contents that are longer").unwrap();

    for writer in [FileWriter::new(), FileWriter::direct()] {
        let mut q = PendingPathQueue::new();
        q.push(FrameIndex(3), target.clone());
        writer.write_next(&mut q, b"new").unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }
}

#[test]
fn no_temporary_files_are_left_behind() {
    let dir = tempfile::tempdir().unwrap();
    let mut q = PendingPathQueue::new();
    q.push(FrameIndex(0), dir.path().join("only.exr"));
    FileWriter::new().write_next(&mut q, &[1, 2, 3]).unwrap();

    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["only.exr".to_string()]);
}

#[test]
fn missing_directory_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing").join("f.png");
    let mut q = PendingPathQueue::new();
    q.push(FrameIndex(0), target);
    let err = FileWriter::new().write_next(&mut q, b"x").unwrap_err();
    assert!(matches!(err, RecorderError::Other(_)));
    assert!(format!("{err:#}").contains("missing"));
    assert!(q.is_empty());
}
