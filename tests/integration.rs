//! Integration tests for duplay


use assert_cmd::Command;
use harness::{TranscriptDir, run_duplay, run_streammark};
use predicates::prelude::*;

const SESSION: &str = "\
$ cd /
$ ls
dir a
14848514 b.txt
8504156 c.dat
dir d
$ cd a
$ ls
dir e
29116 f
2557 g
62596 h.lst
$ cd e
$ ls
584 i
$ cd ..
$ cd ..
$ cd d
$ ls
4060174 j
8033020 d.log
5626152 d.ext
7214296 k
";

#[test]
fn test_report_from_file() {
    let dir = TranscriptDir::new();
    let path = dir.write("session.txt", SESSION);

    let (stdout, _stderr, success) = run_duplay(&[path.to_str().unwrap()]);
    assert!(success, "duplay should succeed");
    assert!(stdout.contains("48,381,165"), "should show used space: {}", stdout);
    assert!(stdout.contains("95,437"), "should show small-dir total: {}", stdout);
    assert!(
        stdout.contains("24,933,642"),
        "should show deletion candidate: {}",
        stdout
    );
}

#[test]
fn test_report_from_stdin() {
    Command::cargo_bin("duplay")
        .unwrap()
        .write_stdin(SESSION)
        .assert()
        .success()
        .stdout(predicate::str::contains("95,437"))
        .stdout(predicate::str::contains("24,933,642"));
}

#[test]
fn test_json_report() {
    let dir = TranscriptDir::new();
    let path = dir.write("session.txt", SESSION);

    let (stdout, _stderr, success) = run_duplay(&["--json", path.to_str().unwrap()]);
    assert!(success);

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["report"]["used"], 48_381_165_u64);
    assert_eq!(value["report"]["free"], 21_618_835_u64);
    assert_eq!(value["report"]["need_to_free"], 8_381_165_u64);
    assert_eq!(value["report"]["small_dir_total"], 95_437_u64);
    assert_eq!(value["report"]["delete_candidate"], 24_933_642_u64);
    assert!(value.get("tree").is_none(), "tree only with --tree");
}

#[test]
fn test_json_report_with_tree() {
    let dir = TranscriptDir::new();
    let path = dir.write("session.txt", SESSION);

    let (stdout, _stderr, success) = run_duplay(&["--json", "--tree", path.to_str().unwrap()]);
    assert!(success);

    let value: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(value["tree"]["name"], "/");
    assert_eq!(value["tree"]["size"], 48_381_165_u64);
    let children = value["tree"]["children"].as_array().unwrap();
    assert_eq!(children.len(), 4);
}

#[test]
fn test_tree_output() {
    let dir = TranscriptDir::new();
    let path = dir.write("session.txt", SESSION);

    let (stdout, _stderr, success) = run_duplay(&["--tree", path.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("├──"), "should draw branches: {}", stdout);
    assert!(stdout.contains("b.txt"), "should list files");
    assert!(
        stdout.contains("4 directories, 10 files"),
        "should count nodes: {}",
        stdout
    );
}

#[test]
fn test_custom_policy_flags() {
    let dir = TranscriptDir::new();
    let path = dir.write(
        "session.txt",
        "$ cd /\n$ ls\n1000 f\ndir a\n$ cd a\n$ ls\n500 g\n",
    );

    let (stdout, _stderr, success) = run_duplay(&[
        "--small-limit",
        "600",
        "--capacity",
        "2000",
        "--min-free",
        "1000",
        path.to_str().unwrap(),
    ]);
    assert!(success);
    // used 1500, free 500, need 500; only `a` (500) is small and is also
    // the smallest directory freeing enough space.
    assert!(stdout.contains("1,500"), "used: {}", stdout);
    assert!(stdout.contains("500"), "small total and candidate: {}", stdout);
}

#[test]
fn test_size_flag_suffixes() {
    let dir = TranscriptDir::new();
    let path = dir.write("session.txt", "$ cd /\n$ ls\n2048 f\n");

    let (stdout, _stderr, success) =
        run_duplay(&["--small-limit", "2K", path.to_str().unwrap()]);
    assert!(success);
    assert!(stdout.contains("2,048"), "2048 <= 2K qualifies: {}", stdout);
}

#[test]
fn test_missing_transcript_file() {
    let (_stdout, stderr, success) = run_duplay(&["/no/such/session.txt"]);
    assert!(!success, "missing file should fail");
    assert!(stderr.contains("cannot open"), "stderr: {}", stderr);
}

#[test]
fn test_streammark_packet_marker() {
    let (stdout, _stderr, success) = run_streammark(&["mjqjpqmgbljsphdztnvjfqwrcgsmlb"]);
    assert!(success);
    assert!(
        stdout.contains("first marker after 7 characters"),
        "stdout: {}",
        stdout
    );
}

#[test]
fn test_streammark_message_marker() {
    let (stdout, _stderr, success) =
        run_streammark(&["--message", "mjqjpqmgbljsphdztnvjfqwrcgsmlb"]);
    assert!(success);
    assert!(stdout.contains("19 characters"), "stdout: {}", stdout);
}

#[test]
fn test_streammark_from_stdin() {
    Command::cargo_bin("streammark")
        .unwrap()
        .write_stdin("bvwbjplbgvbhsrlpgdmjqwftvncz\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 characters"));
}

#[test]
fn test_streammark_no_marker() {
    let (_stdout, stderr, success) = run_streammark(&["aaaaaaaa"]);
    assert!(!success, "repetitive stream has no marker");
    assert!(stderr.contains("no marker found"), "stderr: {}", stderr);
}

#[test]
fn test_streammark_rejects_zero_window() {
    let (_stdout, stderr, success) = run_streammark(&["--window", "0", "abcd"]);
    assert!(!success);
    assert!(stderr.contains("window"), "stderr: {}", stderr);
}
