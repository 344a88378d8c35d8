//! Integration tests for lineq-rs.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use lineq_rs::assembly::{LineAssembler, MemorySource};
use lineq_rs::core::Line;
use lineq_rs::error::{Error, ReadError};
use predicates::prelude::*;
use proptest::prelude::*;
use std::fs::{File, OpenOptions};
use std::os::fd::AsRawFd;
use std::path::PathBuf;
use tempfile::TempDir;
use test_case::test_case;

/// Helper to write an input file and return its path.
fn write_input(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("failed to write input file");
    path
}

/// Helper to drain one real file through an assembler.
fn read_file_lines(assembler: &mut LineAssembler, path: &PathBuf) -> Vec<Vec<u8>> {
    let file = File::open(path).expect("failed to open input file");
    assembler
        .read_all_lines(file.as_raw_fd())
        .expect("read_all_lines failed")
        .into_iter()
        .map(Line::into_bytes)
        .collect()
}

#[test]
fn test_real_descriptor_newline_partitioning() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_input(&dir, "input.txt", b"abc\ndef\n");

    let mut assembler = LineAssembler::new();
    let lines = read_file_lines(&mut assembler, &path);
    assert_eq!(lines, vec![b"abc\n".to_vec(), b"def\n".to_vec()]);
}

#[test]
fn test_real_descriptor_trailing_partial_line() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_input(&dir, "input.txt", b"abc\ndef");

    let mut assembler = LineAssembler::new();
    let lines = read_file_lines(&mut assembler, &path);
    assert_eq!(lines, vec![b"abc\n".to_vec(), b"def".to_vec()]);
}

#[test]
fn test_real_descriptor_empty_file() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_input(&dir, "empty.txt", b"");

    let mut assembler = LineAssembler::new();
    let file = File::open(&path).expect("failed to open input file");
    assert!(
        assembler
            .read_line(file.as_raw_fd())
            .expect("read_line failed")
            .is_none()
    );
    assert!(assembler.pending_descriptors().is_empty());
}

#[test_case(1; "byte at a time")]
#[test_case(4; "four byte chunks")]
#[test_case(4096; "default sized chunks")]
#[test_case(100_000; "chunk larger than content")]
fn test_real_descriptor_chunk_size_independence(chunk_size: usize) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let content: Vec<u8> = b"first line\nsecond\n\nfourth without newline".to_vec();
    let path = write_input(&dir, "input.txt", &content);

    let mut assembler = LineAssembler::with_chunk_size(lineq_rs::FdSource::new(), chunk_size)
        .expect("valid chunk size");
    let lines = read_file_lines(&mut assembler, &path);

    let expected: Vec<Vec<u8>> = content
        .split_inclusive(|&b| b == b'\n')
        .map(<[u8]>::to_vec)
        .collect();
    assert_eq!(lines, expected);
}

#[test]
fn test_real_descriptors_interleaved_isolation() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path_a = write_input(&dir, "a.txt", b"11\n22\n");
    let path_b = write_input(&dir, "b.txt", b"aa\nbb\n");

    let file_a = File::open(&path_a).expect("failed to open a.txt");
    let file_b = File::open(&path_b).expect("failed to open b.txt");
    let (fd_a, fd_b) = (file_a.as_raw_fd(), file_b.as_raw_fd());

    let mut assembler = LineAssembler::with_chunk_size(lineq_rs::FdSource::new(), 2)
        .expect("valid chunk size");

    let a1 = assembler.read_line(fd_a).expect("read a1").expect("line a1");
    let b1 = assembler.read_line(fd_b).expect("read b1").expect("line b1");
    let a2 = assembler.read_line(fd_a).expect("read a2").expect("line a2");
    let b2 = assembler.read_line(fd_b).expect("read b2").expect("line b2");

    assert_eq!(a1.as_bytes(), b"11\n");
    assert_eq!(a2.as_bytes(), b"22\n");
    assert_eq!(b1.as_bytes(), b"aa\n");
    assert_eq!(b2.as_bytes(), b"bb\n");

    assert!(assembler.read_line(fd_a).expect("eos a").is_none());
    assert!(assembler.read_line(fd_b).expect("eos b").is_none());
}

#[test]
fn test_write_only_descriptor_fails() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("wronly.txt");
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&path)
        .expect("failed to create write-only file");

    let mut assembler = LineAssembler::new();
    let err = assembler
        .read_line(file.as_raw_fd())
        .expect_err("reading a write-only descriptor must fail");
    assert!(matches!(err, Error::Read(ReadError::Failed { .. })));
}

#[test]
fn test_invalid_descriptor_rejected() {
    let mut assembler = LineAssembler::new();
    let err = assembler
        .read_line(-3)
        .expect_err("negative descriptor must be rejected");
    assert!(matches!(
        err,
        Error::Read(ReadError::InvalidDescriptor { fd: -3 })
    ));
}

#[test]
fn test_identifier_reuse_is_a_fresh_stream() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path_a = write_input(&dir, "a.txt", b"from a\n");
    let path_b = write_input(&dir, "b.txt", b"from b\n");

    let mut assembler = LineAssembler::new();

    // Drain the first file completely, then drop it so the OS may hand the
    // same descriptor number to the next open.
    let lines_a = read_file_lines(&mut assembler, &path_a);
    assert_eq!(lines_a, vec![b"from a\n".to_vec()]);

    let lines_b = read_file_lines(&mut assembler, &path_b);
    assert_eq!(lines_b, vec![b"from b\n".to_vec()]);
}

proptest! {
    /// Every byte comes back exactly once, in order, for any content and
    /// any chunk size.
    #[test]
    fn prop_round_trip_completeness(
        content in proptest::collection::vec(any::<u8>(), 0..256),
        chunk_size in 1_usize..64,
    ) {
        let mut source = MemorySource::new();
        source.insert(3, content.clone());
        let mut assembler = LineAssembler::with_chunk_size(source, chunk_size)
            .expect("valid chunk size");

        let lines = assembler.read_all_lines(3).expect("read_all_lines failed");
        let joined: Vec<u8> = lines.iter().flat_map(|l| l.as_bytes().iter().copied()).collect();
        prop_assert_eq!(joined, content);
    }

    /// The extracted lines are exactly the newline-inclusive partitions of
    /// the content, regardless of chunk size.
    #[test]
    fn prop_lines_match_newline_partitions(
        content in proptest::collection::vec(prop_oneof![Just(b'\n'), any::<u8>()], 0..256),
        chunk_size in 1_usize..64,
    ) {
        let mut source = MemorySource::new();
        source.insert(3, content.clone());
        let mut assembler = LineAssembler::with_chunk_size(source, chunk_size)
            .expect("valid chunk size");

        let lines: Vec<Vec<u8>> = assembler
            .read_all_lines(3)
            .expect("read_all_lines failed")
            .into_iter()
            .map(Line::into_bytes)
            .collect();

        let expected: Vec<Vec<u8>> = content
            .split_inclusive(|&b| b == b'\n')
            .map(<[u8]>::to_vec)
            .collect();
        prop_assert_eq!(lines, expected);
    }

    /// Interior newlines never appear: each line holds at most one newline,
    /// and only as its final byte.
    #[test]
    fn prop_no_interior_newlines(
        content in proptest::collection::vec(prop_oneof![Just(b'\n'), any::<u8>()], 0..256),
        chunk_size in 1_usize..32,
    ) {
        let mut source = MemorySource::new();
        source.insert(3, content);
        let mut assembler = LineAssembler::with_chunk_size(source, chunk_size)
            .expect("valid chunk size");

        for line in assembler.read_all_lines(3).expect("read_all_lines failed") {
            let bytes = line.as_bytes();
            prop_assert!(!bytes.is_empty());
            let interior = &bytes[..bytes.len() - 1];
            prop_assert!(!interior.contains(&b'\n'));
        }
    }
}

// Binary-level CLI tests

#[test]
fn test_cli_cat_text_output() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_input(&dir, "input.txt", b"abc\ndef\n");

    Command::cargo_bin("lineq-rs")
        .expect("binary built")
        .args(["cat", path.to_str().expect("utf-8 path")])
        .assert()
        .success()
        .stdout("abc\ndef\n");
}

#[test]
fn test_cli_cat_json_output() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_input(&dir, "input.txt", b"abc\ndef\n");

    Command::cargo_bin("lineq-rs")
        .expect("binary built")
        .args(["cat", "--format", "json", path.to_str().expect("utf-8 path")])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"lines\""))
        .stdout(predicate::str::contains("abc"));
}

#[test]
fn test_cli_interleave_single_byte_chunks() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path_a = write_input(&dir, "a.txt", b"11\n22\n");
    let path_b = write_input(&dir, "b.txt", b"aa\nbb\n");

    Command::cargo_bin("lineq-rs")
        .expect("binary built")
        .args([
            "interleave",
            "--chunk-size",
            "1",
            path_a.to_str().expect("utf-8 path"),
            path_b.to_str().expect("utf-8 path"),
        ])
        .assert()
        .success()
        .stdout("11\naa\n22\nbb\n");
}

#[test]
fn test_cli_missing_file_fails() {
    Command::cargo_bin("lineq-rs")
        .expect("binary built")
        .args(["cat", "/nonexistent/input.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open"));
}

#[test]
fn test_cli_rejects_zero_chunk_size() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = write_input(&dir, "input.txt", b"abc\n");

    Command::cargo_bin("lineq-rs")
        .expect("binary built")
        .args(["cat", "--chunk-size", "0", path.to_str().expect("utf-8 path")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chunk size"));
}
