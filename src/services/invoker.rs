use crate::domain::models::{EvaluationRequest, RawInvocationResult};
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use wait_timeout::ChildExt;

/// The decision procedure as a capability. Production code injects
/// [`CliEvaluator`]; tests inject fakes so no process is spawned.
pub trait Evaluator {
    fn evaluate(&self, request: &EvaluationRequest, timeout: Duration) -> RawInvocationResult;
}

/// Spawns the external authorizer CLI once per call. No retries, no caching:
/// a drifted or slow decision is itself the signal under test.
pub struct CliEvaluator {
    bin: String,
}

impl CliEvaluator {
    pub fn new(bin: impl Into<String>) -> Self {
        Self { bin: bin.into() }
    }
}

impl Evaluator for CliEvaluator {
    fn evaluate(&self, request: &EvaluationRequest, timeout: Duration) -> RawInvocationResult {
        let started = Instant::now();

        let mut cmd = Command::new(&self.bin);
        cmd.arg("authorize")
            .arg("--policies")
            .arg(&request.policy_set_path)
            .arg("--schema")
            .arg(&request.schema_path)
            .arg("--entities")
            .arg(&request.entities_path)
            .arg("--principal")
            .arg(&request.principal_id)
            .arg("--action")
            .arg(&request.action_id)
            .arg("--resource")
            .arg(&request.resource_id)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return RawInvocationResult {
                    exit_code: None,
                    stdout: String::new(),
                    stderr: String::new(),
                    duration: started.elapsed(),
                    timed_out: false,
                    invocation_error: Some(format!("failed to launch {}: {}", self.bin, e)),
                }
            }
        };

        // Drain both pipes off-thread so a chatty child can never deadlock
        // against a full pipe buffer while we wait on it.
        let stdout_reader = child.stdout.take().map(spawn_reader);
        let stderr_reader = child.stderr.take().map(spawn_reader);

        let (exit_code, timed_out, invocation_error) = match child.wait_timeout(timeout) {
            Ok(Some(status)) => (status.code(), false, None),
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                (None, true, Some("timeout".to_string()))
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                (None, false, Some(format!("failed to wait on child: {}", e)))
            }
        };

        RawInvocationResult {
            exit_code,
            stdout: join_reader(stdout_reader),
            stderr: join_reader(stderr_reader),
            duration: started.elapsed(),
            timed_out,
            invocation_error,
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut source: R) -> JoinHandle<String> {
    std::thread::spawn(move || {
        let mut buf = String::new();
        let _ = source.read_to_string(&mut buf);
        buf
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .map(|h| h.join().unwrap_or_default())
        .unwrap_or_default()
}
