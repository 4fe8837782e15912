// Shared test helpers for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use partition_matrix::core::error::HarnessError;
use partition_matrix::core::models::{Invocation, Metrics, RunOutcome, RunSummary, Variant};
use partition_matrix::core::registry::VariantRegistry;
use partition_matrix::infra::process::ProcessRunner;
use partition_matrix::reporting::Reporter;
use tempfile::TempDir;

pub const RESULT_LINE: &str =
    "RESULT graph=g1 k=2 km1=10 cut=20 totalPartitionTime=1.5 imbalance=0.02 seed=0";

/// One call received by a `RecordingReporter`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Header { instance: String, k: u32, epsilon: f64 },
    Command(Vec<String>),
    Success(Metrics),
    Failure { message: String, output: Option<String> },
    Summary { runs: usize, dry_run: bool },
}

/// Reporter that keeps every event for later assertions.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<Event>,
}

impl RecordingReporter {
    pub fn commands(&self) -> Vec<&Vec<String>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Command(argv) => Some(argv),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<Metrics> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Success(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn failures(&self) -> Vec<(&str, Option<&str>)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Failure { message, output } => Some((message.as_str(), output.as_deref())),
                _ => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn header(&mut self, instance: &str, k: u32, epsilon: f64) {
        self.events.push(Event::Header {
            instance: instance.to_string(),
            k,
            epsilon,
        });
    }

    fn command(&mut self, invocation: &Invocation) {
        self.events.push(Event::Command(invocation.argv()));
    }

    fn success(&mut self, metrics: &Metrics, _duration: Duration) {
        self.events.push(Event::Success(*metrics));
    }

    fn failure(&mut self, error: &HarnessError) {
        self.events.push(Event::Failure {
            message: error.to_string(),
            output: error.raw_output().map(str::to_string),
        });
    }

    fn summary(&mut self, summary: &RunSummary, dry_run: bool) {
        self.events.push(Event::Summary {
            runs: summary.runs,
            dry_run,
        });
    }
}

/// Process runner answering from a closure `(call index, invocation) -> outcome`.
pub struct ScriptedRunner<F> {
    respond: F,
    calls: Mutex<Vec<Invocation>>,
}

impl<F> ScriptedRunner<F>
where
    F: Fn(usize, &Invocation) -> RunOutcome,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }
}

impl<F> ProcessRunner for ScriptedRunner<F>
where
    F: Fn(usize, &Invocation) -> RunOutcome,
{
    async fn run(&self, invocation: &Invocation) -> Result<RunOutcome, HarnessError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(invocation.clone());
            calls.len() - 1
        };
        Ok((self.respond)(index, invocation))
    }
}

/// Process runner whose processes never finish.
pub struct HangingRunner;

impl ProcessRunner for HangingRunner {
    async fn run(&self, _invocation: &Invocation) -> Result<RunOutcome, HarnessError> {
        std::future::pending().await
    }
}

pub fn outcome(exit_code: i32, stdout: &str) -> RunOutcome {
    outcome_with_stderr(Some(exit_code), stdout, "")
}

pub fn outcome_with_stderr(exit_code: Option<i32>, stdout: &str, stderr: &str) -> RunOutcome {
    RunOutcome {
        exit_code,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
        duration: Duration::from_millis(5),
    }
}

pub fn passing(_: usize, _: &Invocation) -> RunOutcome {
    outcome(0, &format!("partitioning...\n{RESULT_LINE}\n"))
}

/// Registry with fake variants `V1` and `V2`.
pub fn fake_registry() -> VariantRegistry {
    VariantRegistry::new([
        (
            "V1".to_string(),
            Variant {
                executable: PathBuf::from("/fake/bin/v1"),
                config: PathBuf::from("/fake/config/v1.ini"),
            },
        ),
        (
            "V2".to_string(),
            Variant {
                executable: PathBuf::from("/fake/bin/v2"),
                config: PathBuf::from("/fake/config/v2.ini"),
            },
        ),
    ])
}

/// Writes an executable shell script standing in for a partitioner.
#[cfg(unix)]
pub fn write_partitioner(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write fake partitioner");
    let mut permissions = fs::metadata(&path).unwrap().permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(&path, permissions).expect("Failed to make fake partitioner executable");
    path
}

/// Writes a variant table mapping `V1` to `executable`.
pub fn write_variant_table(dir: &TempDir, executable: &Path) -> PathBuf {
    let path = dir.path().join("variants.toml");
    let content = format!(
        "[variants.V1]\nexecutable = \"{}\"\nconfig = \"v1.ini\"\n",
        executable.display()
    );
    fs::write(&path, content).expect("Failed to write variant table");
    path
}

/// Writes a descriptor file and returns its path.
pub fn write_descriptor(dir: &TempDir, json: &str) -> PathBuf {
    let path = dir.path().join("integration_tests.json");
    fs::write(&path, json).expect("Failed to write descriptor");
    path
}

pub const SINGLE_RUN_DESCRIPTOR: &str = r#"{
    "epsilon": 0.03,
    "instances": ["g1"],
    "k": [2],
    "tests": [{ "partitioner": "V1" }]
}"#;
