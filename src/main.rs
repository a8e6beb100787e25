use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nagi_core::Placement;
use nagi_eval::{DefaultLayout, EvalConfig, EvalStack, Evaluator, LoadPolicy, Snapshot};
use tracing::{info, warn};

/// Evaluate a shogi position with KPP/KKP/KK tables.
#[derive(Debug, Parser)]
#[command(name = "nagi", version)]
struct Args {
    /// Directory holding the KK, KKP and KPP table files.
    #[arg(default_value = ".")]
    eval_dir: PathBuf,

    /// Fail when the tables cannot be loaded instead of evaluating material only.
    #[arg(long)]
    strict: bool,

    /// Position to evaluate. Defaults to the starting position.
    #[arg(long, value_name = "SFEN")]
    sfen: Option<String>,
}

impl Args {
    fn config(&self) -> EvalConfig {
        let policy = if self.strict {
            LoadPolicy::Strict
        } else {
            LoadPolicy::ZeroFill
        };
        EvalConfig::new(self.eval_dir.clone()).with_policy(policy)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    info!("nagi starting");

    let args = Args::parse();
    let config = args.config();
    let loaded = nagi_eval::init::<DefaultLayout>(&config)
        .with_context(|| format!("loading tables from {}", config.eval_dir.display()))?;
    if !loaded.outcome.is_loaded() {
        warn!("running with zero-filled tables");
    }

    let placement: Placement = match &args.sfen {
        Some(sfen) => sfen.parse().with_context(|| format!("parsing SFEN \"{sfen}\""))?,
        None => Placement::startpos(),
    };
    let pos = Snapshot::from_placement(&placement)?;

    let evaluator = Evaluator::new(loaded.tables);
    let mut stack = EvalStack::new();
    let score = evaluator.evaluate(&pos, &mut stack, 0);
    info!(score, side_to_move = %placement.side_to_move(), "evaluated position");
    println!("{score}");
    Ok(())
}
