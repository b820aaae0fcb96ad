//! Frame set integration tests.

use std::{fs, path::Path};

use loopreel::{Frame, FrameSet, LoopreelError, frame_set::parse_frame_name};

fn touch(directory: &Path, name: &str) {
    fs::write(directory.join(name), b"frame").expect("Failed to write frame");
}

#[test]
fn parse_keeps_dots_in_subject() {
    assert_eq!(
        parse_frame_name("a.b.c.0042.png"),
        Some(("a.b.c".to_string(), 42))
    );
    assert_eq!(parse_frame_name("sunset.7.jpg"), Some(("sunset".to_string(), 7)));
    assert_eq!(parse_frame_name("sunset.png"), None);
}

#[test]
fn frames_are_ordered_by_number_not_name() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let directory = temporary_directory.path();
    for name in ["sun.10.png", "sun.9.png", "sun.100.png", "sun.0001.png"] {
        touch(directory, name);
    }

    let set = FrameSet::from_directory(directory, "sun").unwrap();
    let indices: Vec<u64> = set.frames().iter().map(|frame| frame.index).collect();
    assert_eq!(indices, vec![1, 9, 10, 100]);
    assert_eq!(set.length(), 4);
    assert!(set.is_animatable());
    assert!(set.paths().iter().all(|path| path.is_absolute()));
}

#[test]
fn other_subjects_and_files_are_ignored() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let directory = temporary_directory.path();
    touch(directory, "sun.0001.png");
    touch(directory, "sun.0002.jpg");
    touch(directory, "moon.0001.png");
    touch(directory, "sun.0003.txt");
    touch(directory, "notes.png");
    fs::create_dir(directory.join("sun.0004.png")).unwrap();

    let set = FrameSet::from_directory(directory, "sun").unwrap();
    assert_eq!(set.length(), 2);
    assert_eq!(set.subject(), "sun");
}

#[test]
fn duplicate_frame_numbers_are_an_error() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let directory = temporary_directory.path();
    touch(directory, "sun.0001.png");
    touch(directory, "sun.1.png");
    touch(directory, "sun.0002.png");

    let error = FrameSet::from_directory(directory, "sun").unwrap_err();
    match error {
        LoopreelError::DuplicateFrameIndex { subject, index, .. } => {
            assert_eq!(subject, "sun");
            assert_eq!(index, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn single_frame_set_is_not_animatable() {
    let set = FrameSet::new("sun", vec![Frame::new("/frames/sun.0001.png", 1)]).unwrap();
    assert!(!set.is_animatable());
    assert!(!set.is_empty());
}

#[test]
fn missing_directory_is_an_io_error() {
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let missing = temporary_directory.path().join("missing");
    let error = FrameSet::from_directory(&missing, "sun").unwrap_err();
    assert!(matches!(error, LoopreelError::IoError(_)));
}
