use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const ROOT_ENV: &str = "DRIFTCHECK_ROOT";
pub const CONFIG_FILE: &str = "driftcheck.toml";

/// Immutable engine configuration, resolved once at startup and passed by
/// reference to every component. There is no process-wide singleton.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub root: PathBuf,
    pub policy_dir: String,
    pub schema_file: String,
    pub evaluator_bin: String,
    pub timeout_ms: u64,
    pub request: RequestSpec,
}

impl EngineConfig {
    pub fn policy_dir_path(&self) -> PathBuf {
        self.root.join(&self.policy_dir)
    }

    pub fn schema_path(&self) -> PathBuf {
        self.root.join(&self.schema_file)
    }
}

/// How principal/action/resource identifiers are spelled for each
/// representation. The entity types mirror the authorizer schema; only the
/// bare resource name varies per call.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RequestSpec {
    pub principal_type: String,
    pub check_id: String,
    pub declarative_action: String,
    pub runtime_action: String,
    pub declarative_resource_type: String,
    pub runtime_resource_type: String,
    pub declarative_resource_kind: String,
    pub runtime_resource_kind: String,
}

impl Default for RequestSpec {
    fn default() -> Self {
        Self {
            principal_type: "ConfigEvaluation".to_string(),
            check_id: "s3-bucket-server-side-encryption-enabled".to_string(),
            declarative_action: "cloudformation:ValidateTemplate".to_string(),
            runtime_action: "config:EvaluateCompliance".to_string(),
            declarative_resource_type: "CloudFormationTemplate".to_string(),
            runtime_resource_type: "S3Resource".to_string(),
            declarative_resource_kind: "cloudformation_template".to_string(),
            runtime_resource_kind: "s3_bucket".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    engine: EngineSection,
    #[serde(default)]
    request: RequestSpec,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct EngineSection {
    policy_dir: String,
    schema_file: String,
    evaluator_bin: String,
    timeout_ms: u64,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            policy_dir: "policies".to_string(),
            schema_file: "schema.cedarschema".to_string(),
            evaluator_bin: "cedar".to_string(),
            timeout_ms: 10_000,
        }
    }
}

pub fn resolve_root(flag: Option<&str>) -> PathBuf {
    if let Some(r) = flag {
        return PathBuf::from(r);
    }
    if let Ok(r) = std::env::var(ROOT_ENV) {
        if !r.is_empty() {
            return PathBuf::from(r);
        }
    }
    PathBuf::from(".")
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn load_config(root: &Path) -> anyhow::Result<EngineConfig> {
    let path = config_path(root);
    let file: ConfigFile = if path.exists() {
        let raw = std::fs::read_to_string(&path)?;
        toml::from_str(&raw)?
    } else {
        ConfigFile::default()
    };
    Ok(EngineConfig {
        root: root.to_path_buf(),
        policy_dir: file.engine.policy_dir,
        schema_file: file.engine.schema_file,
        evaluator_bin: file.engine.evaluator_bin,
        timeout_ms: file.engine.timeout_ms,
        request: file.request,
    })
}
