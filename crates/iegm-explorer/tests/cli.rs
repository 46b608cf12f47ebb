use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

const SIZE: usize = 1250;

fn explorer() -> Command {
    Command::cargo_bin("iegm-explorer").unwrap()
}

struct Fixture {
    _root: tempfile::TempDir,
    data: PathBuf,
    indices: PathBuf,
}

impl Fixture {
    /// Train and test manifests; names in `absent` get no recording file
    fn new(absent: &[&str]) -> Self {
        let train = [("100-SR-03.txt", 0), ("101-AFt-01.txt", 0), ("102-VT-02.txt", 1), ("200-VT-01.txt", 1)];
        let test = [("103-SVT-01.txt", 0), ("104-VFb-01.txt", 1)];

        let root = tempfile::tempdir().unwrap();
        let data = root.path().join("data");
        let indices = root.path().join("data_indices");
        fs::create_dir_all(&data).unwrap();
        fs::create_dir_all(&indices).unwrap();

        for (file, entries) in [("train_indice.csv", &train[..]), ("test_indice.csv", &test[..])] {
            let mut csv = String::from(",label,Filename\n");
            for (i, (name, class)) in entries.iter().enumerate() {
                csv.push_str(&format!("{},{},{}\n", i, class, name));
                if !absent.contains(name) {
                    write_recording(&data, name, 3.0 + i as f32);
                }
            }
            fs::write(indices.join(file), csv).unwrap();
        }

        Fixture {
            _root: root,
            data,
            indices,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = explorer();
        cmd.arg("--path_data")
            .arg(&self.data)
            .arg("--path_indices")
            .arg(&self.indices)
            .arg("--no-plot");
        cmd
    }
}

fn write_recording(dir: &Path, name: &str, freq: f32) {
    let text: String = (0..SIZE)
        .map(|i| format!("{:.5}\n", (2.0 * std::f32::consts::PI * freq * i as f32 / 250.0).sin()))
        .collect();
    fs::write(dir.join(name), text).unwrap();
}

// =============================================================================
// GENERAL
// =============================================================================

#[test]
fn test_help_flag() {
    explorer()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--path_data"));
}

#[test]
fn test_usage_error_exits_with_one() {
    explorer()
        .args(["--size", "abc"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("abc"));
}

#[test]
fn test_missing_manifest_exits_with_one() {
    let root = tempfile::tempdir().unwrap();
    explorer()
        .arg("--path_indices")
        .arg(root.path())
        .arg("--no-plot")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("File not found"));
}

// =============================================================================
// REPORT
// =============================================================================

#[test]
fn test_report_printed() {
    let fixture = Fixture::new(&[]);
    fixture
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Recordings: 6"))
        .stdout(predicate::str::contains("Name: Mode, dtype: int64"))
        .stdout(predicate::str::contains("[class 1] labels"))
        .stdout(predicate::str::contains("Missing recordings").not());
}

#[test]
fn test_missing_recording_skipped_by_default() {
    let fixture = Fixture::new(&["200-VT-01.txt"]);
    fixture
        .command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Recordings: 5"))
        .stdout(predicate::str::contains("Missing recordings: 1"))
        .stdout(predicate::str::contains("200-VT-01.txt"));
}

#[test]
fn test_strict_missing_recording_fails() {
    let fixture = Fixture::new(&["200-VT-01.txt"]);
    fixture
        .command()
        .arg("--strict")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Recording does not exist"))
        .stderr(predicate::str::contains("200-VT-01.txt"));
}

#[test]
fn test_wrong_segment_size_fails() {
    let fixture = Fixture::new(&[]);
    fixture
        .command()
        .args(["--size", "1000"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected 1000"));
}

// =============================================================================
// FIGURES
// =============================================================================

#[test]
fn test_describe_prints_one_block_per_class() {
    let fixture = Fixture::new(&[]);
    fixture
        .command()
        .arg("--describe")
        .assert()
        .success()
        .stdout(predicate::str::contains("== AFt,SVT,SR =="))
        .stdout(predicate::str::contains("== VFb,VT =="))
        .stdout(predicate::str::contains("kurt"));
}

#[test]
fn test_bandpass_titles_figures() {
    let fixture = Fixture::new(&[]);
    fixture
        .command()
        .args(["--describe", "--bandpass", "1", "40"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== AFt,SVT,SR (band-pass 1-40 Hz) =="));
}

#[test]
fn test_inspect_known_recording() {
    let fixture = Fixture::new(&[]);
    fixture
        .command()
        .args(["--describe", "--inspect", "100-SR-03.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("== 100-SR-03.txt =="));
}

#[test]
fn test_inspect_unknown_recording_fails() {
    let fixture = Fixture::new(&[]);
    fixture
        .command()
        .args(["--inspect", "nope"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("'nope' is not in the dataset"));
}
