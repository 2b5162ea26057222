use crate::cli::Representation;
use crate::domain::models::{Decision, Diagnostics, Outcome, RawInvocationResult};

/// Collapse a raw invocation into the canonical decision record.
///
/// The exit-status mapping is the only authority boundary between the
/// external decision procedure and this engine: 0 means permitted, anything
/// else means denied. Output text is carried through untouched; a failed or
/// timed-out invocation surfaces its cause in the stderr diagnostics.
pub fn normalize(
    raw: RawInvocationResult,
    representation: Representation,
    resource_kind: &str,
) -> Decision {
    let outcome = if raw.timed_out || raw.invocation_error.is_some() {
        Outcome::Error
    } else if raw.exit_code == Some(0) {
        Outcome::Allow
    } else {
        Outcome::Deny
    };

    let stderr = match raw.invocation_error {
        Some(err) if raw.stderr.is_empty() => err,
        Some(err) => format!("{}\n{}", raw.stderr, err),
        None => raw.stderr,
    };

    Decision {
        outcome,
        compliant: outcome == Outcome::Allow,
        duration_ms: raw.duration.as_millis() as u64,
        representation,
        resource_kind: resource_kind.to_string(),
        diagnostics: Diagnostics {
            stdout: raw.stdout,
            stderr,
        },
    }
}
