/*
 * SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
 *
 * SPDX-License-Identifier: GPL-2.0-or-later
 */

//! Integration tests for the filesplit binary

use assert_cmd::Command;
use flate2::read::GzDecoder;
use predicates::prelude::*;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("out")).unwrap();
        Self { dir }
    }

    fn input(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn out(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    fn out_file(&self, name: &str) -> String {
        fs::read_to_string(self.out().join(name)).unwrap()
    }

    fn out_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.out())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

fn filesplit() -> Command {
    Command::cargo_bin("filesplit").unwrap()
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[test]
fn test_split_with_repeated_header() {
    let ws = Workspace::new();
    let input = ws.input("data.csv", "id,name\n1,a\n2,b\n3,c\n4,d\n5,e\n");

    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("adding: data_000001.csv"));

    assert_eq!(
        ws.out_names(),
        vec!["data_000001.csv", "data_000002.csv", "data_000003.csv"]
    );
    assert_eq!(ws.out_file("data_000001.csv"), "id,name\n1,a\n2,b\n");
    assert_eq!(ws.out_file("data_000002.csv"), "id,name\n3,c\n4,d\n");
    assert_eq!(ws.out_file("data_000003.csv"), "id,name\n5,e\n");
}

#[test]
fn test_split_without_repeated_header() {
    let ws = Workspace::new();
    let input = ws.input("data.csv", "id\n1\n2\n3\n4\n5\n");

    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "2", "-r", "false"])
        .assert()
        .success();

    assert_eq!(ws.out_file("data_000001.csv"), "id\n1\n2\n");
    assert_eq!(ws.out_file("data_000002.csv"), "3\n4\n");
    assert_eq!(ws.out_file("data_000003.csv"), "5\n");
}

#[test]
fn test_data_lines_are_preserved_in_order() {
    let ws = Workspace::new();
    let mut content = String::from("h1\nh2\n");
    let data: Vec<String> = (0..47).map(|i| format!("row-{i}\n")).collect();
    content.push_str(&data.concat());
    let input = ws.input("big.txt", &content);

    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "10", "-d", "2"])
        .assert()
        .success();

    let names = ws.out_names();
    assert_eq!(names.len(), 5);
    let mut rebuilt = String::new();
    for name in &names {
        let text = ws.out_file(name);
        let body = text.strip_prefix("h1\nh2\n").unwrap();
        assert!(body.lines().count() <= 10);
        rebuilt.push_str(body);
    }
    assert_eq!(rebuilt, data.concat());
}

#[test]
fn test_header_only_input_writes_nothing() {
    let ws = Workspace::new();
    let input = ws.input("empty.csv", "id,name\n");

    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "2"])
        .assert()
        .success();

    assert!(ws.out_names().is_empty());
}

#[test]
fn test_output_filename_base() {
    let ws = Workspace::new();
    let input = ws.input("data.csv", "h\n1\n2\n");

    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "1", "-b", "part"])
        .assert()
        .success();

    assert_eq!(ws.out_names(), vec!["part_000001.csv", "part_000002.csv"]);
}

#[test]
fn test_wildcard_with_recursion() {
    let ws = Workspace::new();
    ws.input("in/a.csv", "h\n1\n");
    ws.input("in/sub/b.csv", "h\n2\n3\n");
    ws.input("in/skip.txt", "h\n9\n");
    let pattern = format!("{}/*.csv", ws.dir.path().join("in").display());

    filesplit()
        .args(["-i", pattern.as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "1", "-s", "-b", "ignored"])
        .assert()
        .success();

    assert_eq!(
        ws.out_names(),
        vec!["a_000001.csv", "b_000001.csv", "b_000002.csv"]
    );
}

#[test]
fn test_compress_keeps_originals() {
    let ws = Workspace::new();
    let input = ws.input("data.csv", "h\n1\n2\n3\n");

    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "2", "-c"])
        .assert()
        .success();

    assert_eq!(
        ws.out_names(),
        vec![
            "data_000001.csv",
            "data_000001.csv.gz",
            "data_000002.csv",
            "data_000002.csv.gz",
        ]
    );
    for name in ["data_000001.csv", "data_000002.csv"] {
        let mut unpacked = String::new();
        GzDecoder::new(fs::File::open(ws.out().join(format!("{name}.gz"))).unwrap())
            .read_to_string(&mut unpacked)
            .unwrap();
        assert_eq!(unpacked, ws.out_file(name));
    }
}

#[test]
fn test_existing_output_requires_overwrite() {
    let ws = Workspace::new();
    let input = ws.input("data.csv", "h\n1\n");
    let (input_arg, out_arg) = (path_arg(&input), path_arg(&ws.out()));
    let args = ["-i", input_arg.as_str(), "-o", out_arg.as_str(), "-m", "2"];

    filesplit().args(args).assert().success();
    filesplit()
        .args(args)
        .assert()
        .failure()
        .stdout(predicate::str::contains("use -w to overwrite"));

    fs::write(&input, "h\n2\n").unwrap();
    filesplit().args(args).arg("-w").assert().success();
    assert_eq!(ws.out_file("data_000001.csv"), "h\n2\n");
}

#[test]
fn test_missing_required_option() {
    let ws = Workspace::new();
    filesplit()
        .args(["-o", path_arg(&ws.out()).as_str(), "-m", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("--inputfilepattern"));
}

#[test]
fn test_zero_max_lines_is_rejected() {
    let ws = Workspace::new();
    let input = ws.input("data.csv", "h\n1\n");
    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "0"])
        .assert()
        .failure();
    assert!(ws.out_names().is_empty());
}

#[test]
fn test_missing_output_folder_is_usage_error() {
    let ws = Workspace::new();
    let input = ws.input("data.csv", "h\n1\n");
    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.dir.path().join("nope")).as_str(), "-m", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("does not exist"))
        .stdout(predicate::str::contains("Try `filesplit --help'"));
}

#[test]
fn test_missing_input_fails() {
    let ws = Workspace::new();
    filesplit()
        .args([
            "-i",
            path_arg(&ws.dir.path().join("missing.csv")).as_str(),
            "-o",
            path_arg(&ws.out()).as_str(),
            "-m",
            "2",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Not found"));
}

#[test]
fn test_help_exits_cleanly() {
    filesplit()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--maxlinesperfile"))
        .stdout(predicate::str::contains("--repeatheaderrows"));
}

#[test]
fn test_quiet_suppresses_output() {
    let ws = Workspace::new();
    let input = ws.input("data.csv", "h\n1\n");
    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "2", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_log_file_records_run() {
    let ws = Workspace::new();
    let input = ws.input("data.csv", "h\n1\n2\n");
    let log = ws.dir.path().join("run.log");

    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "1"])
        .args(["--lf", path_arg(&log).as_str(), "--li"])
        .assert()
        .success();

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("adding: data_000002.csv"));
    assert!(text.contains("Total 1 input files split into 2 files"));
}

#[test]
fn test_split_by_size() {
    let ws = Workspace::new();
    let row = "x".repeat(1023) + "\n";
    let input = ws.input("data.csv", &format!("h\n{}", row.repeat(3)));

    filesplit()
        .args(["-i", path_arg(&input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-x", "2k"])
        .assert()
        .success();

    assert_eq!(
        ws.out_names(),
        vec!["data_000001.csv", "data_000002.csv", "data_000003.csv"]
    );
}

#[test]
fn test_compress_second_input_into_same_folder() {
    let ws = Workspace::new();
    let first = ws.input("a.csv", "h\n1\n");
    let second = ws.input("b.csv", "h\n2\n");

    for input in [&first, &second] {
        filesplit()
            .args(["-i", path_arg(input).as_str(), "-o", path_arg(&ws.out()).as_str(), "-m", "2", "-c"])
            .assert()
            .success();
    }

    assert_eq!(
        ws.out_names(),
        vec!["a_000001.csv", "a_000001.csv.gz", "b_000001.csv", "b_000001.csv.gz"]
    );
}
