mod app;
mod input;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use app::App;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TestKind {
    Acuity,
    Plates,
}

#[derive(Parser, Debug)]
#[command(name = "viscreen", about = "Self-administered vision screening")]
pub struct Args {
    /// Which screening test to run.
    #[arg(long, value_enum, default_value = "acuity")]
    pub test: TestKind,

    /// Display language (en, hi, ta).
    #[arg(long, default_value = "en")]
    pub lang: String,

    /// Fix the stimulus randomness for a reproducible session.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Dark theme (ANSI styling only; behavior is unchanged).
    #[arg(long)]
    pub dark: bool,

    /// Print the final report as JSON.
    #[arg(long)]
    pub json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    App::new(args)?.run()
}
