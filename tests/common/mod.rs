//! Common test utilities for icdsync integration tests
//!
//! This module provides shared test infrastructure including:
//! - CLI invocation helpers
//! - Order file and zip fixtures
//! - Archive inspection helpers

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Exit status codes matching the Rust application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
    CmsFetchFailed = 2,
    Icd10FetchFailed = 3,
    ZipLinkNotFound = 4,
    Icd10LinkNotFound = 5,
    ZipFetchFailed = 6,
    ExtractFailed = 7,
    Interrupted = 130,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            2 => ExitStatus::CmsFetchFailed,
            3 => ExitStatus::Icd10FetchFailed,
            4 => ExitStatus::ZipLinkNotFound,
            5 => ExitStatus::Icd10LinkNotFound,
            6 => ExitStatus::ZipFetchFailed,
            7 => ExitStatus::ExtractFailed,
            130 => ExitStatus::Interrupted,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
    pub exit_code: i32,
}

/// Scratch directories and environment for one CLI run
pub struct MockEnvironment {
    /// Holds the config file pointed to by `ICDSYNC_CONFIG`
    pub config_dir: TempDir,
    /// Working directory for inputs and outputs
    pub work_dir: TempDir,
    pub env_vars: HashMap<String, String>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    pub fn new() -> Self {
        let config_dir = TempDir::new().expect("Failed to create temp config dir");
        let work_dir = TempDir::new().expect("Failed to create temp work dir");
        let env = Self {
            config_dir,
            work_dir,
            env_vars: HashMap::new(),
        };
        env.write_config("timeout_secs = 5\n");
        env
    }

    /// Replace the config file contents
    pub fn write_config(&self, toml: &str) {
        std::fs::write(self.config_path(), toml).expect("Failed to write config");
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().join("config.toml")
    }

    pub fn work_path(&self) -> &Path {
        self.work_dir.path()
    }

    /// Write a file into the work directory, returning its path
    pub fn file(&self, name: &str, data: impl AsRef<[u8]>) -> PathBuf {
        let path = self.work_path().join(name);
        std::fs::write(&path, data).expect("Failed to write fixture");
        path
    }

    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }
}

/// Run the CLI with the given arguments
pub fn icdsync(args: &[&str]) -> CliResponse {
    icdsync_with_env(args, &MockEnvironment::new())
}

/// Run the CLI with the given arguments and environment
pub fn icdsync_with_env(args: &[&str], env: &MockEnvironment) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_icdsync"));
    cmd.args(args);
    cmd.env("ICDSYNC_CONFIG", env.config_path());
    cmd.env_remove("ICDSYNC_LOG");
    for (key, value) in &env.env_vars {
        cmd.env(key, value);
    }
    cmd.stdin(Stdio::null());
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let output = cmd.output().expect("Failed to execute command");
    parse_output(output)
}

fn parse_output(output: Output) -> CliResponse {
    let exit_code = output.status.code().unwrap_or(1);
    CliResponse {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}

/// One line of a tabular order file
pub fn order_line(seq: u32, code: &str, flag: char, short: &str, long: &str) -> String {
    format!("{:05} {:<8}{} {:<60} {}\r\n", seq, code, flag, short, long)
}

/// A small order file with headers (flag 0) and billable codes (flag 1)
pub fn order_file() -> String {
    [
        order_line(1, "A00", '0', "Cholera", "Cholera"),
        order_line(2, "A001", '1', "Cholera due to Vibrio cholerae 01, biovar eltor", "Cholera due to Vibrio cholerae 01, biovar eltor"),
        order_line(3, "A000", '1', "Cholera due to Vibrio cholerae 01, biovar cholerae", "Cholera due to Vibrio cholerae 01, biovar cholerae"),
        order_line(4, "Z9989", '1', "Dependence on other enabling machines", "Dependence on other enabling machines and devices"),
    ]
    .concat()
}

/// Build a zip with the given entries
pub fn zip_with(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(name.to_string(), SimpleFileOptions::default())
            .expect("Failed to start zip entry");
        writer.write_all(data).expect("Failed to write zip entry");
    }
    writer.finish().expect("Failed to finish zip").into_inner()
}

/// The CMS download as published: several members, one of them the order file
pub fn tabular_zip(year: &str) -> Vec<u8> {
    let codes_name = format!("Code Descriptions/icd10cm_codes_{}.txt", year);
    let order_name = format!("Code Descriptions/icd10cm_order_{}.txt", year);
    let order = order_file();
    zip_with(&[
        (codes_name.as_str(), b"A000 Cholera".as_slice()),
        (order_name.as_str(), order.as_bytes()),
    ])
}

/// Read the single member of a generated archive as `(name, text)`
pub fn read_single_member(path: &Path) -> (String, String) {
    let data = std::fs::read(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    let mut archive = zip::ZipArchive::new(Cursor::new(data)).expect("Not a zip archive");
    assert_eq!(archive.len(), 1, "expected a single member in {}", path.display());
    let mut member = archive.by_index(0).expect("Failed to open member");
    let mut text = String::new();
    member.read_to_string(&mut text).expect("Member is not UTF-8");
    (member.name().to_string(), text)
}

/// Path of a generated archive in `dir`
pub fn archive_path(dir: &Path, label: &str, year: &str) -> PathBuf {
    dir.join(format!("{} version - Filename_Base_{}.zip", label, year))
}
