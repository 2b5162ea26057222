use crate::cli::Representation;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

/// The outcome reported by the decision procedure, plus a local `Error`
/// member for invocations that never produced a usable decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Allow,
    Deny,
    Error,
}

/// One request tuple handed to the decision procedure. Built per invocation,
/// never persisted.
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub representation: Representation,
    pub policy_set_path: PathBuf,
    pub schema_path: PathBuf,
    pub entities_path: PathBuf,
    pub principal_id: String,
    pub action_id: String,
    pub resource_id: String,
}

/// What actually happened when the external process ran. Timeouts and launch
/// failures are values here, not errors.
#[derive(Debug, Clone)]
pub struct RawInvocationResult {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
    pub timed_out: bool,
    pub invocation_error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics {
    pub stdout: String,
    pub stderr: String,
}

/// Canonical decision record, derived deterministically from a
/// RawInvocationResult. `compliant` is always `outcome == Allow`; the two
/// fields are never set independently.
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    pub outcome: Outcome,
    pub compliant: bool,
    pub duration_ms: u64,
    pub representation: Representation,
    pub resource_kind: String,
    pub diagnostics: Diagnostics,
}

impl Decision {
    /// Stdout and stderr joined, for reasoning-phrase checks against the
    /// authorizer output regardless of which stream it used.
    pub fn combined_output(&self) -> String {
        format!("{}{}", self.diagnostics.stdout, self.diagnostics.stderr)
    }
}

/// The pairwise verdict: one declarative decision, one runtime decision,
/// same policy set and schema. `no_security_gaps` is the drift-framing name
/// for the same predicate as `consistent`.
#[derive(Debug, Serialize)]
pub struct ConsistencyVerdict {
    pub decisions_match: bool,
    pub compliance_match: bool,
    pub consistent: bool,
    pub no_security_gaps: bool,
    pub left: Decision,
    pub right: Decision,
}

#[derive(Serialize)]
pub struct CheckItem {
    pub name: String,
    pub status: String,
}

#[derive(Serialize)]
pub struct DoctorReport {
    pub overall: String,
    pub checks: Vec<CheckItem>,
}

#[derive(Serialize)]
pub struct PolicyArtifactReport {
    pub name: String,
    pub path: String,
    pub bytes: usize,
    pub sha256: String,
    pub content: String,
}

#[derive(Serialize)]
pub struct PolicyVerifyReport {
    pub name: String,
    pub path: String,
    pub bytes: usize,
    pub sha256: String,
    pub byte_identical: bool,
}
