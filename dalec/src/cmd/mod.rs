mod build;

use crate::cmd::build::Build;
use anyhow::Result;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

const DEFAULT_LEVEL_FILTER: LevelFilter = LevelFilter::Info;

/// A declarative package and container build orchestrator.
#[derive(Debug, Parser)]
#[clap(about, long_about = None, version)]
pub struct Args {
    /// Set the logging level. One of [off|error|warn|info|debug|trace]. Defaults
    /// to info. You can also leave this unset and use the RUST_LOG env variable.
    #[clap(long = "log-level")]
    pub log_level: Option<LevelFilter>,

    #[clap(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(Debug, Parser)]
pub enum Subcommand {
    /// Resolve a spec against a target and drive it through the packaging
    /// and container-assembly pipeline.
    Build(Build),
}

pub fn run(args: Args) -> Result<()> {
    match args.subcommand {
        Subcommand::Build(build) => build.run(),
    }
}

/// Use `level` if present, or else use `RUST_LOG` if present, or else use a default.
pub fn init_logger(level: Option<LevelFilter>) {
    match (std::env::var(env_logger::DEFAULT_FILTER_ENV).ok(), level) {
        (Some(_), None) => {
            Builder::from_default_env().init();
        }
        _ => {
            Builder::new()
                .filter(Some(env!("CARGO_CRATE_NAME")), level.unwrap_or(DEFAULT_LEVEL_FILTER))
                .init();
        }
    }
}
