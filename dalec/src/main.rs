use crate::cmd::{init_logger, Args};
use anyhow::Result;
use clap::Parser;

mod cmd;
mod driver;
mod registry;
mod request;

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level);
    cmd::run(args)
}
