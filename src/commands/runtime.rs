use crate::*;
use std::path::Path;

pub fn handle_runtime_commands(cli: &Cli, config: &EngineConfig) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Eval {
            representation,
            entities,
            resource,
            check,
        } => {
            let evaluator = CliEvaluator::new(config.evaluator_bin.clone());
            let engine = Engine::new(config, &evaluator);
            let decision =
                engine.evaluate(*representation, Path::new(entities), resource, check.as_deref())?;
            audit(
                "eval",
                serde_json::json!({
                    "representation": representation,
                    "resource": resource,
                    "outcome": decision.outcome,
                }),
            );
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: &decision
                    })?
                );
            } else {
                println!("outcome: {}", outcome_label(decision.outcome));
                println!("compliant: {}", decision.compliant);
                println!("duration_ms: {}", decision.duration_ms);
                println!("resource_kind: {}", decision.resource_kind);
            }
        }
        Commands::Compare {
            declarative_entities,
            declarative_resource,
            runtime_entities,
            runtime_resource,
            check,
        } => {
            let evaluator = CliEvaluator::new(config.evaluator_bin.clone());
            let engine = Engine::new(config, &evaluator);
            let pair = PairSpec {
                declarative_entities: declarative_entities.into(),
                declarative_resource: declarative_resource.clone(),
                runtime_entities: runtime_entities.into(),
                runtime_resource: runtime_resource.clone(),
                check_id: check.clone(),
            };
            let verdict = engine.compare_pair(&pair)?;
            audit(
                "compare",
                serde_json::json!({
                    "declarative_resource": declarative_resource,
                    "runtime_resource": runtime_resource,
                    "consistent": verdict.consistent,
                    "left": verdict.left.outcome,
                    "right": verdict.right.outcome,
                }),
            );
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: true,
                        data: &verdict
                    })?
                );
            } else {
                println!("consistent: {}", verdict.consistent);
                println!(
                    "declarative: {} ({} ms)",
                    outcome_label(verdict.left.outcome),
                    verdict.left.duration_ms
                );
                println!(
                    "runtime: {} ({} ms)",
                    outcome_label(verdict.right.outcome),
                    verdict.right.duration_ms
                );
            }
            if !verdict.consistent {
                std::process::exit(1);
            }
        }
        Commands::Doctor => {
            let report = doctor_report(config);
            audit("doctor", serde_json::json!({"overall": report.overall}));
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&JsonOut {
                        ok: report.overall == "ok",
                        data: report
                    })?
                );
            } else {
                println!("doctor: {}", report.overall);
                for c in report.checks {
                    println!("{}\t{}", c.name, c.status);
                }
            }
        }
        Commands::Policy { .. } => {
            unreachable!("handled before runtime dispatch")
        }
    }

    Ok(())
}

fn outcome_label(outcome: Outcome) -> String {
    format!("{:?}", outcome).to_ascii_uppercase()
}
