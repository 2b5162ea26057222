use crate::*;

pub fn handle_policy_commands(cli: &Cli, config: &EngineConfig) -> anyhow::Result<bool> {
    let Commands::Policy { command } = &cli.command else {
        return Ok(false);
    };

    let store = ArtifactStore::new(config);
    match command {
        PolicyCommands::List => {
            let names = store.list_policies()?;
            print_out(cli.json, &names, |n| n.to_string())?;
        }
        PolicyCommands::Show { name } => {
            let content = store.policy_content(name)?;
            let report = PolicyArtifactReport {
                name: name.clone(),
                path: store.policy_path(name).to_string_lossy().to_string(),
                bytes: content.len(),
                sha256: sha256_hex(&content),
                content: String::from_utf8_lossy(&content).to_string(),
            };
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: report
                    })?
                );
            } else {
                println!("name: {}", report.name);
                println!("path: {}", report.path);
                println!("sha256: {}", report.sha256);
                println!("{}", report.content);
            }
        }
        PolicyCommands::Verify { name } => {
            // two independent reads; byte equality is the ground truth
            let first = store.policy_content(name)?;
            let second = store.policy_content(name)?;
            let report = PolicyVerifyReport {
                name: name.clone(),
                path: store.policy_path(name).to_string_lossy().to_string(),
                bytes: first.len(),
                sha256: sha256_hex(&first),
                byte_identical: first == second,
            };
            audit(
                "policy_verify",
                serde_json::json!({"policy": name, "byte_identical": report.byte_identical}),
            );
            let identical = report.byte_identical;
            print_one(cli.json, report, |r| {
                format!(
                    "{}\t{}",
                    r.name,
                    if r.byte_identical { "unchanged" } else { "mutated" }
                )
            })?;
            if !identical {
                std::process::exit(1);
            }
        }
    }

    Ok(true)
}
