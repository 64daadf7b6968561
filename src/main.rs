mod engine;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use engine::core::EngineConfig;
use engine::EngineApp;

#[derive(Parser, Debug)]
#[command(name = "kinema-studio")]
#[command(about = "Normalize a physics problem, solve it and animate its scene headlessly")]
struct Cli {
    /// Problem description as JSON
    problem: PathBuf,

    /// RON engine configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame limit, overriding the configuration
    #[arg(long)]
    frames: Option<u64>,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let problem = std::fs::read_to_string(&cli.problem)
        .with_context(|| format!("reading problem {}", cli.problem.display()))?;

    let mut app = EngineApp::new(config);
    let output = app.run(&problem, cli.frames)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn init_tracing() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("tracing subscriber already set");
    }
}
