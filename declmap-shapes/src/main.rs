//! DeclMap shapes demo
//!
//! Runs a script of reconcile/clear steps against a recording canvas and
//! prints every draw and erase.
//!
//! Usage:
//!   shapes-demo                          # built-in walkthrough
//!   shapes-demo --script steps.json      # custom script
//!   shapes-demo --config mapper.json --with-square --verbose

use anyhow::{Context, Result};
use clap::Parser;
use declmap_engine::MapperConfig;
use declmap_shapes::{mapper_for, Canvas, Script, ShapeKind};
use std::{fs, path::PathBuf};
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "shapes-demo")]
#[command(about = "Reconcile shape declarations onto a recording canvas")]
struct Args {
    /// JSON script of reconcile/clear steps (defaults to the built-in walkthrough)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// JSON mapper configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Register a mapping for squares too
    #[arg(long)]
    with_square: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            MapperConfig::from_json(&json).context("parsing mapper config")?
        }
        None => MapperConfig::default(),
    };
    debug!("Mapper config: {:?}", config);

    let script = match &args.script {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            Script::from_json(&json).context("parsing script")?
        }
        None => Script::walkthrough(),
    };

    let mut kinds = vec![ShapeKind::Line, ShapeKind::Circle];
    if args.with_square {
        kinds.push(ShapeKind::Square);
    }
    let mut mapper = mapper_for(&kinds, config).context("building mapper")?;
    let mut canvas = Canvas::new();

    info!("Running {} steps with mappings for {:?}", script.steps.len(), kinds);
    let outcomes = script.run(&mut mapper, &mut canvas);

    for op in canvas.history() {
        println!("{op}");
    }
    let failed = outcomes.iter().filter(|outcome| outcome.is_failure()).count();
    println!(
        "{} steps, {} failed, {} strokes visible",
        outcomes.len(),
        failed,
        canvas.len()
    );

    mapper.clear(&mut canvas).context("final clear")?;
    Ok(())
}
