//! Command line entry point.

use clap::Parser;
use objbook::{App, Result, ViewerConfig};

/// Plays back baked OBJ frame sequences as a looping animation.
#[derive(Parser, Debug)]
#[command(name = "objbook", version, about)]
struct Args {
    /// Directory or HTTP base URL holding the frame sets.
    #[arg(long)]
    base: Option<String>,

    /// JSON configuration file.
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Set to start playing immediately (defaults to the first configured set).
    #[arg(long)]
    set: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ViewerConfig::from_file(path)?,
        None => ViewerConfig::default(),
    };
    if let Some(base) = args.base {
        config.base_path = base;
    }

    App::new(config, args.set)?.run()
}
