use crate::cli::Representation;
use crate::config::EngineConfig;
use crate::domain::models::{
    CheckItem, ConsistencyVerdict, Decision, DoctorReport, EvaluationRequest,
};
use crate::services::artifacts::{ArtifactError, ArtifactStore};
use crate::services::consistency::compare;
use crate::services::invoker::Evaluator;
use crate::services::normalize::normalize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One declarative/runtime fixture pair compared by a single verdict. Both
/// sides run against the same policy directory and schema by construction.
pub struct PairSpec {
    pub declarative_entities: PathBuf,
    pub declarative_resource: String,
    pub runtime_entities: PathBuf,
    pub runtime_resource: String,
    pub check_id: Option<String>,
}

/// Ties the invoker, normalizer, and comparator together. Holds only
/// borrowed, immutable collaborators; evaluations are sequential and the
/// declarative side of a pair always completes before the runtime side
/// starts.
pub struct Engine<'a> {
    config: &'a EngineConfig,
    evaluator: &'a dyn Evaluator,
    store: ArtifactStore,
}

impl<'a> Engine<'a> {
    pub fn new(config: &'a EngineConfig, evaluator: &'a dyn Evaluator) -> Self {
        Self {
            config,
            evaluator,
            store: ArtifactStore::new(config),
        }
    }

    pub fn evaluate(
        &self,
        representation: Representation,
        entities: &Path,
        resource: &str,
        check_id: Option<&str>,
    ) -> anyhow::Result<Decision> {
        self.preflight(entities)?;
        let request = self.build_request(representation, entities, resource, check_id);
        let raw = self
            .evaluator
            .evaluate(&request, Duration::from_millis(self.config.timeout_ms));
        Ok(normalize(raw, representation, self.resource_kind(representation)))
    }

    pub fn compare_pair(&self, pair: &PairSpec) -> anyhow::Result<ConsistencyVerdict> {
        let check = pair.check_id.as_deref();
        let left = self.evaluate(
            Representation::Declarative,
            &pair.declarative_entities,
            &pair.declarative_resource,
            check,
        )?;
        let right = self.evaluate(
            Representation::Runtime,
            &pair.runtime_entities,
            &pair.runtime_resource,
            check,
        )?;
        Ok(compare(left, right))
    }

    /// Missing artifacts fail the evaluation up front; they are caller
    /// preconditions, not decision outcomes.
    fn preflight(&self, entities: &Path) -> anyhow::Result<()> {
        if !self.store.policy_dir().exists() {
            return Err(ArtifactError::PolicyDirMissing(
                self.store.policy_dir().to_string_lossy().to_string(),
            )
            .into());
        }
        if !self.store.schema_exists() {
            return Err(ArtifactError::SchemaMissing(
                self.store.schema_path().to_string_lossy().to_string(),
            )
            .into());
        }
        if !entities.exists() {
            return Err(
                ArtifactError::EntitiesMissing(entities.to_string_lossy().to_string()).into(),
            );
        }
        Ok(())
    }

    fn build_request(
        &self,
        representation: Representation,
        entities: &Path,
        resource: &str,
        check_id: Option<&str>,
    ) -> EvaluationRequest {
        let spec = &self.config.request;
        let check = check_id.unwrap_or(&spec.check_id);
        let (action, resource_type) = match representation {
            Representation::Declarative => (&spec.declarative_action, &spec.declarative_resource_type),
            Representation::Runtime => (&spec.runtime_action, &spec.runtime_resource_type),
        };
        EvaluationRequest {
            representation,
            policy_set_path: self.store.policy_dir().to_path_buf(),
            schema_path: self.store.schema_path().to_path_buf(),
            entities_path: entities.to_path_buf(),
            principal_id: format!("{}::\"{}\"", spec.principal_type, check),
            action_id: format!("Action::\"{}\"", action),
            resource_id: format!("{}::\"{}\"", resource_type, resource),
        }
    }

    fn resource_kind(&self, representation: Representation) -> &str {
        match representation {
            Representation::Declarative => &self.config.request.declarative_resource_kind,
            Representation::Runtime => &self.config.request.runtime_resource_kind,
        }
    }
}

/// Environment checks for the engine: artifacts present, authorizer
/// launchable. An absent config file is fine (defaults apply).
pub fn doctor_report(config: &EngineConfig) -> DoctorReport {
    let store = ArtifactStore::new(config);

    let evaluator_ok = std::process::Command::new(&config.evaluator_bin)
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false);

    let policy_files = store
        .list_policies()
        .map(|names| !names.is_empty())
        .unwrap_or(false);

    let checks = vec![
        CheckItem {
            name: "config_file".to_string(),
            status: if crate::config::config_path(&config.root).exists() {
                "ok"
            } else {
                "default"
            }
            .to_string(),
        },
        CheckItem {
            name: "policy_dir".to_string(),
            status: if store.policy_dir().exists() {
                "ok"
            } else {
                "missing"
            }
            .to_string(),
        },
        CheckItem {
            name: "policy_files".to_string(),
            status: if policy_files { "ok" } else { "missing" }.to_string(),
        },
        CheckItem {
            name: "schema_file".to_string(),
            status: if store.schema_exists() { "ok" } else { "missing" }.to_string(),
        },
        CheckItem {
            name: "evaluator_available".to_string(),
            status: if evaluator_ok { "ok" } else { "missing" }.to_string(),
        },
    ];

    let overall = if checks
        .iter()
        .all(|c| c.status == "ok" || c.status == "default")
    {
        "ok"
    } else {
        "needs_attention"
    }
    .to_string();

    DoctorReport { overall, checks }
}
