use crate::domain::models::{ConsistencyVerdict, Decision};

/// Combine the declarative and runtime decisions into a verdict.
///
/// Pure and total: no side effects, no external calls. Decision match and
/// compliance match are computed independently and both must hold, so the
/// verdict stays correct if outcome granularity is ever extended. An ERROR
/// on one side never pairs consistently with anything but an ERROR on the
/// other.
pub fn compare(left: Decision, right: Decision) -> ConsistencyVerdict {
    let decisions_match = left.outcome == right.outcome;
    let compliance_match = left.compliant == right.compliant;
    ConsistencyVerdict {
        decisions_match,
        compliance_match,
        consistent: decisions_match && compliance_match,
        no_security_gaps: decisions_match && compliance_match,
        left,
        right,
    }
}

#[cfg(test)]
mod tests {
    use super::compare;
    use crate::cli::Representation;
    use crate::domain::models::{Decision, Diagnostics, Outcome};

    fn decision(representation: Representation, outcome: Outcome) -> Decision {
        Decision {
            outcome,
            compliant: outcome == Outcome::Allow,
            duration_ms: 10,
            representation,
            resource_kind: "s3_bucket".to_string(),
            diagnostics: Diagnostics {
                stdout: String::new(),
                stderr: String::new(),
            },
        }
    }

    fn verdict(left: Outcome, right: Outcome) -> (bool, bool) {
        let v = compare(
            decision(Representation::Declarative, left),
            decision(Representation::Runtime, right),
        );
        (v.consistent, v.no_security_gaps)
    }

    #[test]
    fn identical_decisions_are_consistent() {
        assert_eq!(verdict(Outcome::Allow, Outcome::Allow), (true, true));
        assert_eq!(verdict(Outcome::Deny, Outcome::Deny), (true, true));
    }

    #[test]
    fn diverging_decisions_are_drift() {
        assert_eq!(verdict(Outcome::Allow, Outcome::Deny), (false, false));
        assert_eq!(verdict(Outcome::Deny, Outcome::Allow), (false, false));
    }

    #[test]
    fn error_only_matches_error() {
        assert_eq!(verdict(Outcome::Error, Outcome::Allow), (false, false));
        assert_eq!(verdict(Outcome::Error, Outcome::Deny), (false, false));
        assert_eq!(verdict(Outcome::Allow, Outcome::Error), (false, false));
        assert_eq!(verdict(Outcome::Error, Outcome::Error), (true, true));
    }

    #[test]
    fn match_bits_are_reported_individually() {
        let v = compare(
            decision(Representation::Declarative, Outcome::Allow),
            decision(Representation::Runtime, Outcome::Deny),
        );
        assert!(!v.decisions_match);
        assert!(!v.compliance_match);
        assert_eq!(v.left.outcome, Outcome::Allow);
        assert_eq!(v.right.outcome, Outcome::Deny);
    }
}
