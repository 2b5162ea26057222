use clap::Parser;

mod cli;
mod commands;
mod config;
mod domain;
mod services;

pub use cli::*;
pub use config::*;
pub use domain::models::*;
pub use services::artifacts::*;
pub use services::consistency::*;
pub use services::engine::*;
pub use services::invoker::*;
pub use services::normalize::*;
pub use services::output::*;
pub use services::storage::*;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        report_failure(&cli, &err);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let root = config::resolve_root(cli.root.as_deref());
    let config = config::load_config(&root)?;

    if commands::handle_policy_commands(cli, &config)? {
        return Ok(());
    }
    commands::handle_runtime_commands(cli, &config)
}

fn report_failure(cli: &Cli, err: &anyhow::Error) -> ! {
    if cli.json {
        let payload = serde_json::json!({
            "ok": false,
            "error": { "code": error_code(err), "message": format!("{:#}", err) }
        });
        println!("{}", payload);
    } else {
        eprintln!("error: {:#}", err);
    }
    std::process::exit(1);
}

fn error_code(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<ArtifactError>().is_some() {
        "MISSING_ARTIFACT"
    } else if err.downcast_ref::<toml::de::Error>().is_some() {
        "CONFIG"
    } else {
        "INTERNAL"
    }
}
