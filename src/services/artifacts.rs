use crate::config::EngineConfig;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("policy not found: {0}")]
    PolicyNotFound(String),
    #[error("policy directory not found: {0}")]
    PolicyDirMissing(String),
    #[error("schema not found: {0}")]
    SchemaMissing(String),
    #[error("entities file not found: {0}")]
    EntitiesMissing(String),
}

/// Read-only access to the policy set and schema under the project root.
/// Nothing here ever writes; callers prove policy immutability by reading
/// the same artifact twice and comparing bytes.
pub struct ArtifactStore {
    policy_dir: PathBuf,
    schema_path: PathBuf,
}

impl ArtifactStore {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            policy_dir: config.policy_dir_path(),
            schema_path: config.schema_path(),
        }
    }

    pub fn policy_dir(&self) -> &Path {
        &self.policy_dir
    }

    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    pub fn policy_path(&self, name: &str) -> PathBuf {
        self.policy_dir.join(format!("{}.cedar", name))
    }

    pub fn policy_exists(&self, name: &str) -> bool {
        self.policy_path(name).exists()
    }

    pub fn schema_exists(&self) -> bool {
        self.schema_path.exists()
    }

    pub fn policy_content(&self, name: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.policy_path(name);
        if !path.exists() {
            return Err(ArtifactError::PolicyNotFound(path.to_string_lossy().to_string()).into());
        }
        Ok(std::fs::read(path)?)
    }

    pub fn list_policies(&self) -> anyhow::Result<Vec<String>> {
        if !self.policy_dir.exists() {
            return Err(
                ArtifactError::PolicyDirMissing(self.policy_dir.to_string_lossy().to_string())
                    .into(),
            );
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.policy_dir)? {
            let path = entry?.path();
            if path.extension().map(|e| e == "cedar").unwrap_or(false) {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
