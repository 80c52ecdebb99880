//! Tests for replay files

use std::fs;

use tempfile::TempDir;

use crate::replay::{
    file_name, file_number, last_file_number, list_files, next_file_path, read_buffer,
    save_buffer, write_buffer,
};
use crate::{Encode, Message, ProtocolError, ReferenceData, decode_message};

// =============================================================================
// Naming
// =============================================================================

#[test]
fn test_file_name_is_zero_padded() {
    assert_eq!(file_name(1), "fb_000001.bin");
    assert_eq!(file_name(123456), "fb_123456.bin");
    assert_eq!(file_name(1234567), "fb_1234567.bin");
}

#[test]
fn test_file_number_parses_replay_names_only() {
    assert_eq!(file_number("fb_000042.bin"), Some(42));
    assert_eq!(file_number("fb_1234567.bin"), Some(1234567));
    assert_eq!(file_number("fb_42.bin"), None);
    assert_eq!(file_number("fb_00004x.bin"), None);
    assert_eq!(file_number("xx_000042.bin"), None);
    assert_eq!(file_number("fb_000042.txt"), None);
}

// =============================================================================
// Directory scanning
// =============================================================================

#[test]
fn test_next_file_in_empty_dir_is_one() {
    let dir = TempDir::new().unwrap();
    assert_eq!(last_file_number(dir.path()).unwrap(), 0);
    assert_eq!(
        next_file_path(dir.path()).unwrap(),
        dir.path().join("fb_000001.bin")
    );
}

#[test]
fn test_next_file_follows_highest_number() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("fb_000003.bin"), b"x").unwrap();
    fs::write(dir.path().join("fb_000010.bin"), b"x").unwrap();
    fs::write(dir.path().join("notes.txt"), b"x").unwrap();

    assert_eq!(last_file_number(dir.path()).unwrap(), 10);
    assert_eq!(
        next_file_path(dir.path()).unwrap(),
        dir.path().join("fb_000011.bin")
    );
}

#[test]
fn test_list_files_numeric_order() {
    let dir = TempDir::new().unwrap();
    for n in [12, 2, 7] {
        fs::write(dir.path().join(file_name(n)), b"x").unwrap();
    }
    fs::write(dir.path().join("README"), b"x").unwrap();

    let names: Vec<String> = list_files(dir.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["fb_000002.bin", "fb_000007.bin", "fb_000012.bin"]);
}

#[test]
fn test_list_files_missing_dir() {
    let dir = TempDir::new().unwrap();
    let err = list_files(&dir.path().join("absent")).unwrap_err();
    assert!(matches!(err, ProtocolError::Replay { .. }));
}

// =============================================================================
// Read / write
// =============================================================================

#[test]
fn test_save_and_read_back_decodes() {
    let dir = TempDir::new().unwrap();
    let replay_dir = dir.path().join("debug");
    let reference = ReferenceData::new(12, "BBG002SBQ0F2", "CPI YOY Index");

    let first = save_buffer(&replay_dir, &reference.encode()).unwrap();
    let second = save_buffer(&replay_dir, &reference.encode()).unwrap();
    assert!(first.ends_with("fb_000001.bin"));
    assert!(second.ends_with("fb_000002.bin"));

    let buf = read_buffer(&second).unwrap();
    assert_eq!(decode_message(&buf).unwrap(), Message::Reference(reference));
}

#[test]
fn test_concurrent_saves_never_share_a_file() {
    let dir = TempDir::new().unwrap();
    let replay_dir = dir.path().join("debug");

    let handles: Vec<_> = (0..4u32)
        .map(|writer| {
            let replay_dir = replay_dir.clone();
            std::thread::spawn(move || {
                (0..8u32)
                    .map(|i| {
                        let reference = ReferenceData::new(u64::from(writer * 100 + i), "G", "S");
                        save_buffer(&replay_dir, &reference.encode()).unwrap()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut saved: Vec<_> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    saved.sort();
    saved.dedup();
    assert_eq!(saved.len(), 32);
    assert_eq!(list_files(&replay_dir).unwrap().len(), 32);
    for path in &saved {
        assert!(decode_message(&read_buffer(path).unwrap()).is_ok());
    }
}

#[test]
fn test_save_empty_buffer_rejected() {
    let dir = TempDir::new().unwrap();
    let err = save_buffer(dir.path(), &[]).unwrap_err();
    assert!(matches!(err, ProtocolError::EmptyData));
    assert!(list_files(dir.path()).unwrap().is_empty());
}

#[test]
fn test_write_empty_buffer_rejected() {
    let dir = TempDir::new().unwrap();
    let err = write_buffer(&dir.path().join("fb_000001.bin"), &[]).unwrap_err();
    assert!(matches!(err, ProtocolError::EmptyData));
}

#[test]
fn test_read_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = read_buffer(&dir.path().join("fb_000001.bin")).unwrap_err();
    assert!(matches!(err, ProtocolError::Replay { .. }));
}
