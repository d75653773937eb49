//! Shared helpers for running the `tlay` binary in integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use tempfile::TempDir;

/// Captured outcome of one CLI invocation. Combined output is also written to
/// `log_path` so failures can be inspected.
pub struct CliResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
    pub workdir: TempDir,
}

/// Scratch directory for input files a case needs.
pub fn workdir(case: &str) -> TempDir {
    tempfile::Builder::new()
        .prefix(&format!("tlay-{case}-"))
        .tempdir()
        .expect("create test workdir")
}

pub fn run_cli_case(case: &str, args: &[&str]) -> CliResult {
    run_cli_in(workdir(case), case, args)
}

/// Run `tlay` with `args` inside `dir`.
pub fn run_cli_in(dir: TempDir, case: &str, args: &[&str]) -> CliResult {
    let output = Command::new(env!("CARGO_BIN_EXE_tlay"))
        .args(args)
        .current_dir(dir.path())
        .env("RUST_LOG", "debug")
        .env("NO_COLOR", "1")
        .env_remove("TERM")
        .output()
        .expect("spawn tlay");

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let log_path = dir.path().join(format!("{case}.log"));
    fs::write(
        &log_path,
        format!(
            "args: {args:?}\nstatus: {}\n--- stdout ---\n{stdout}\n--- stderr ---\n{stderr}\n",
            output.status
        ),
    )
    .expect("write case log");

    CliResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
        workdir: dir,
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}
