//! CLI entry point for seam merging image reduction

use clap::Parser;
use seammerge::io::cli::{Cli, FileProcessor};

fn main() -> seammerge::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
