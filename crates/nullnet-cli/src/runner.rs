//! Batch runner: a fixed pool of worker threads analyzing one file per job.
//!
//! ```text
//!              ┌────────── job queue (mpsc, Arc<Mutex<Receiver>>) ─────────┐
//! dispatcher ──┤                                                           ├── worker × jobs
//!              └───────────────────── outcome channel ◀────────────────────┘
//! ```
//!
//! Each job owns its input text, its RNG seed, and its result. Workers share
//! nothing but the queue. A failing or panicking job produces a
//! [`FileOutcome`] with an error; the rest of the batch keeps going.

use std::any::Any;
use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

use anyhow::{Context, Result};
use nullnet_metrics::{AnalysisConfig, AnalysisError, ResultRecord, analyze};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::report::{ReportFormat, write_report};

/// One unit of work: analyze `input` and write its report.
#[derive(Debug, Clone)]
pub struct Job {
    pub file_name: String,
    pub input: PathBuf,
    pub seed: u64,
}

/// Settings shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub analysis: AnalysisConfig,
    pub output_dir: PathBuf,
    pub report_format: ReportFormat,
}

/// What happened to one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub file_name: String,
    pub seed: u64,
    pub elapsed_ms: u64,
    #[serde(flatten)]
    pub result: OutcomeResult,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OutcomeResult {
    Written {
        report: PathBuf,
        record: ResultRecord,
    },
    Failed {
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        code: Option<&'static str>,
    },
}

impl FileOutcome {
    pub const fn is_failure(&self) -> bool {
        matches!(self.result, OutcomeResult::Failed { .. })
    }
}

/// Per-file seed: `base` mixed with the BLAKE3 hash of the file name, so a
/// file's seed does not depend on which worker picks it up or in what order.
pub fn derive_seed(base: u64, file_name: &str) -> u64 {
    let hash = blake3::hash(file_name.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    base ^ u64::from_le_bytes(bytes)
}

/// Regular, non-hidden files directly inside `dir`, sorted by name.
pub fn list_inputs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read directory {}", dir.display()))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("Failed to list {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %path.display(), "skipping file with non-UTF-8 name");
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        inputs.push((name, path));
    }
    inputs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(inputs)
}

#[allow(clippy::cast_possible_truncation)]
fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

enum JobError {
    Analysis(AnalysisError),
    Io(anyhow::Error),
}

fn process(job: &Job, settings: &BatchSettings) -> Result<(PathBuf, ResultRecord), JobError> {
    let text = fs::read_to_string(&job.input)
        .with_context(|| format!("Failed to read {}", job.input.display()))
        .map_err(JobError::Io)?;
    let record = analyze(&job.file_name, &text, &settings.analysis, job.seed)
        .map_err(JobError::Analysis)?;
    let report = write_report(
        &settings.output_dir,
        &record,
        settings.report_format,
        settings.analysis.top_k,
    )
    .map_err(JobError::Io)?;
    Ok((report, record))
}

fn outcome_of(job: &Job, settings: &BatchSettings) -> OutcomeResult {
    match process(job, settings) {
        Ok((report, record)) => {
            info!(file = %job.file_name, report = %report.display(), "report written");
            OutcomeResult::Written { report, record }
        }
        Err(JobError::Analysis(err)) => {
            warn!(file = %job.file_name, code = err.code(), error = %err, "analysis failed");
            OutcomeResult::Failed {
                message: err.to_string(),
                code: Some(err.code()),
            }
        }
        Err(JobError::Io(err)) => {
            let message = format!("{err:#}");
            warn!(file = %job.file_name, error = %message, "file failed");
            OutcomeResult::Failed {
                message,
                code: None,
            }
        }
    }
}

/// Run `work`, turning a panic into a failed outcome for `file_name`.
fn guarded(file_name: &str, work: impl FnOnce() -> OutcomeResult) -> OutcomeResult {
    panic::catch_unwind(AssertUnwindSafe(work)).unwrap_or_else(|payload| {
        let message = format!("worker panicked: {}", panic_message(payload.as_ref()));
        error!(file = %file_name, error = %message, "file failed");
        OutcomeResult::Failed {
            message,
            code: None,
        }
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic payload")
}

fn run_job(job: Job, settings: &BatchSettings) -> FileOutcome {
    let started = Instant::now();
    let result = guarded(&job.file_name, || outcome_of(&job, settings));

    FileOutcome {
        file_name: job.file_name,
        seed: job.seed,
        elapsed_ms: elapsed_ms(started),
        result,
    }
}

/// Run every job on a pool of `workers` threads and return the outcomes
/// sorted by file name.
pub fn run_batch(jobs: Vec<Job>, settings: &BatchSettings, workers: usize) -> Vec<FileOutcome> {
    let total = jobs.len();
    let workers = workers.clamp(1, total.max(1));
    debug!(total, workers, "starting batch");

    let (job_tx, job_rx) = mpsc::channel::<Job>();
    let job_rx = Arc::new(Mutex::new(job_rx));
    let (outcome_tx, outcome_rx) = mpsc::channel::<FileOutcome>();

    let mut outcomes = thread::scope(|scope| {
        for worker in 0..workers {
            let job_rx = Arc::clone(&job_rx);
            let outcome_tx = outcome_tx.clone();
            scope.spawn(move || {
                loop {
                    // Hold the lock only while taking the next job.
                    let next = match job_rx.lock() {
                        Ok(guard) => guard.recv(),
                        Err(_) => break,
                    };
                    let Ok(job) = next else {
                        break;
                    };
                    debug!(worker, file = %job.file_name, "picked up job");
                    if outcome_tx.send(run_job(job, settings)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(outcome_tx);

        for job in jobs {
            if job_tx.send(job).is_err() {
                break;
            }
        }
        drop(job_tx);

        outcome_rx.iter().collect::<Vec<_>>()
    });

    outcomes.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    outcomes
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings(output_dir: &Path) -> BatchSettings {
        BatchSettings {
            analysis: AnalysisConfig {
                sample_count: 3,
                top_k: 2,
            },
            output_dir: output_dir.to_path_buf(),
            report_format: ReportFormat::Text,
        }
    }

    #[test]
    fn derive_seed_depends_on_name_and_base() {
        assert_eq!(derive_seed(1, "a.txt"), derive_seed(1, "a.txt"));
        assert_ne!(derive_seed(1, "a.txt"), derive_seed(1, "b.txt"));
        assert_ne!(derive_seed(1, "a.txt"), derive_seed(2, "a.txt"));
    }

    #[test]
    fn list_inputs_skips_hidden_files_and_dirs() {
        let dir = TempDir::new().expect("tempdir");
        fs::write(dir.path().join("b.txt"), "A B\n").expect("write");
        fs::write(dir.path().join("a.txt"), "A B\n").expect("write");
        fs::write(dir.path().join(".hidden"), "A B\n").expect("write");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");

        let names: Vec<String> = list_inputs(dir.path())
            .expect("list")
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["a.txt", "b.txt"]);
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let input = TempDir::new().expect("tempdir");
        let output = TempDir::new().expect("tempdir");
        let files = [
            ("good.txt", "A B\nB C\nC D\n"),
            ("bad.txt", "A B C\n"),
            ("loop.txt", "A A\n"),
            ("tri.txt", "A B\nB C\nC A\n"),
        ];
        let jobs: Vec<Job> = files
            .iter()
            .map(|(name, text)| {
                let path = input.path().join(name);
                fs::write(&path, text).expect("write");
                Job {
                    file_name: (*name).to_string(),
                    input: path,
                    seed: derive_seed(7, name),
                }
            })
            .collect();

        let outcomes = run_batch(jobs, &settings(output.path()), 3);
        let names: Vec<&str> = outcomes.iter().map(|o| o.file_name.as_str()).collect();
        assert_eq!(names, ["bad.txt", "good.txt", "loop.txt", "tri.txt"]);

        let failed: Vec<&str> = outcomes
            .iter()
            .filter(|o| o.is_failure())
            .map(|o| o.file_name.as_str())
            .collect();
        assert_eq!(failed, ["bad.txt", "loop.txt"]);

        assert!(output.path().join("good.txt").is_file());
        assert!(output.path().join("tri.txt").is_file());
        assert!(!output.path().join("bad.txt").exists());
    }

    #[test]
    fn missing_input_is_reported_as_failure() {
        let output = TempDir::new().expect("tempdir");
        let job = Job {
            file_name: "gone.txt".to_string(),
            input: output.path().join("does-not-exist"),
            seed: 0,
        };
        let outcomes = run_batch(vec![job], &settings(output.path()), 4);
        assert_eq!(outcomes.len(), 1);
        match &outcomes[0].result {
            OutcomeResult::Failed { message, code } => {
                assert!(message.contains("Failed to read"));
                assert!(code.is_none());
            }
            OutcomeResult::Written { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn panicking_job_becomes_a_failed_outcome() {
        let outcome = guarded("boom.txt", || panic!("metric blew up"));
        match outcome {
            OutcomeResult::Failed { message, code } => {
                assert_eq!(message, "worker panicked: metric blew up");
                assert!(code.is_none());
            }
            OutcomeResult::Written { .. } => panic!("expected failure"),
        }

        let owned = guarded("boom.txt", || panic!("{} nodes", 3));
        assert!(matches!(
            owned,
            OutcomeResult::Failed { ref message, .. } if message == "worker panicked: 3 nodes"
        ));
    }

    #[test]
    fn results_do_not_depend_on_worker_count() {
        let input = TempDir::new().expect("tempdir");
        let out_one = TempDir::new().expect("tempdir");
        let out_many = TempDir::new().expect("tempdir");
        let texts = ["A B\nB C\nC D\nD A\nA C\n", "X Y\nY Z\nZ W\nW V\nV X\n"];

        let make_jobs = || -> Vec<Job> {
            texts
                .iter()
                .enumerate()
                .map(|(i, text)| {
                    let name = format!("g{i}.txt");
                    let path = input.path().join(&name);
                    fs::write(&path, text).expect("write");
                    Job {
                        seed: derive_seed(42, &name),
                        file_name: name,
                        input: path,
                    }
                })
                .collect()
        };

        let one = run_batch(make_jobs(), &settings(out_one.path()), 1);
        let many = run_batch(make_jobs(), &settings(out_many.path()), 4);
        for (a, b) in one.iter().zip(&many) {
            match (&a.result, &b.result) {
                (
                    OutcomeResult::Written { record: ra, .. },
                    OutcomeResult::Written { record: rb, .. },
                ) => assert_eq!(ra, rb),
                _ => panic!("both runs should succeed"),
            }
        }
    }
}
