use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "driftcheck",
    version,
    about = "Shift-left / shift-right policy consistency checker"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Project root holding the policy set (falls back to DRIFTCHECK_ROOT, then the current directory)"
    )]
    pub root: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Eval {
        #[arg(long, value_enum)]
        representation: Representation,
        #[arg(long, help = "Entity-graph JSON file for this evaluation")]
        entities: String,
        #[arg(long, help = "Resource identifier (bare name, without the entity type)")]
        resource: String,
        #[arg(long, help = "Compliance check identifier (defaults to the configured check)")]
        check: Option<String>,
    },
    Compare {
        #[arg(long)]
        declarative_entities: String,
        #[arg(long)]
        declarative_resource: String,
        #[arg(long)]
        runtime_entities: String,
        #[arg(long)]
        runtime_resource: String,
        #[arg(long, help = "Compliance check identifier (defaults to the configured check)")]
        check: Option<String>,
    },
    Policy {
        #[command(subcommand)]
        command: PolicyCommands,
    },
    Doctor,
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommands {
    List,
    Show { name: String },
    Verify { name: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Representation {
    Declarative,
    Runtime,
}
