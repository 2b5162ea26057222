use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnv {
    _tmp: TempDir,
    pub home: PathBuf,
    pub project: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let home = tmp.path().join("home");
        fs::create_dir_all(&home).expect("create isolated home");

        let project = make_fixture_project(tmp.path());

        let env = Self {
            _tmp: tmp,
            home,
            project,
        };
        env.write_config(10_000);
        env
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("driftcheck").expect("binary under test");
        cmd.env("HOME", &self.home).env_remove("DRIFTCHECK_ROOT");
        cmd
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .arg("--root")
            .arg(self.project.to_str().expect("project path utf8"))
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    /// Like `run_json` but for commands expected to exit nonzero (drift,
    /// precondition failures) while still printing a JSON payload.
    pub fn run_json_failure(&self, args: &[&str]) -> Value {
        let out = self
            .cmd()
            .arg("--json")
            .arg("--root")
            .arg(self.project.to_str().expect("project path utf8"))
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stdout
            .clone();
        serde_json::from_slice(&out).expect("valid json output")
    }

    pub fn entities(&self, name: &str) -> String {
        self.project
            .join("entities")
            .join(name)
            .to_string_lossy()
            .to_string()
    }

    pub fn write_config(&self, timeout_ms: u64) {
        let authorizer = self.project.join("bin/fake-authorizer");
        fs::write(
            self.project.join("driftcheck.toml"),
            format!(
                "[engine]\nevaluator_bin = \"{}\"\ntimeout_ms = {}\n",
                authorizer.display(),
                timeout_ms
            ),
        )
        .expect("write config");
    }
}

fn make_fixture_project(base: &Path) -> PathBuf {
    let project = base.join("project");

    fs::create_dir_all(project.join("policies")).expect("create policies dir");
    fs::create_dir_all(project.join("entities")).expect("create entities dir");
    fs::create_dir_all(project.join("bin")).expect("create bin dir");

    fs::write(
        project.join("policies/s3-encryption-enforcement.cedar"),
        r#"permit(
    principal == ConfigEvaluation::"s3-bucket-server-side-encryption-enabled",
    action,
    resource
) when {
    resource.encryption == "AES256"
};
"#,
    )
    .expect("write policy");

    fs::write(
        project.join("schema.cedarschema"),
        "entity CloudFormationTemplate;\nentity S3Resource;\nentity ConfigEvaluation;\n",
    )
    .expect("write schema");

    fs::write(
        project.join("entities/encrypted_bucket_entity.json"),
        serde_json::json!([{
            "uid": {"type": "S3Resource", "id": "atdd-test-encrypted-bucket"},
            "attrs": {"encryption": "AES256"},
            "parents": []
        }])
        .to_string(),
    )
    .expect("write encrypted entities");

    fs::write(
        project.join("entities/unencrypted_bucket_entity.json"),
        serde_json::json!([{
            "uid": {"type": "S3Resource", "id": "atdd-test-unencrypted-bucket"},
            "attrs": {},
            "parents": []
        }])
        .to_string(),
    )
    .expect("write unencrypted entities");

    fs::write(
        project.join("entities/hanging_bucket_entity.json"),
        serde_json::json!([{
            "uid": {"type": "S3Resource", "id": "atdd-test-hanging-bucket"},
            "attrs": {"marker": "SIMULATE_HANG"},
            "parents": []
        }])
        .to_string(),
    )
    .expect("write hanging entities");

    // Stand-in authorizer: decides from the entities payload the way the
    // real one would decide from resource attributes.
    let script = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "fake-authorizer 1.0.0"
  exit 0
fi
entities=""
while [ $# -gt 0 ]; do
  case "$1" in
    --entities)
      entities="$2"
      shift 2
      ;;
    *)
      shift
      ;;
  esac
done
if grep -q SIMULATE_HANG "$entities" 2>/dev/null; then
  exec sleep 30
fi
if grep -q AES256 "$entities" 2>/dev/null; then
  echo "ALLOW: server-side encryption requirement satisfied"
  exit 0
fi
echo "DENY: no server-side encryption configured" >&2
exit 1
"#;
    let script_path = project.join("bin/fake-authorizer");
    fs::write(&script_path, script).expect("write authorizer script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(&script_path)
            .expect("script metadata")
            .permissions();
        perms.set_mode(0o755);
        fs::set_permissions(&script_path, perms).expect("chmod script");
    }

    project
}
