use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::Path;
use tracing::info;

mod cli;
mod replay;

use cli::{Cli, Command, PickArgs, ReplayArgs};
use scenegrab_drag::DragConfig;
use scenegrab_scene::SceneDescription;

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay(args) => run_replay(args),
        Command::Pick(args) => run_pick(args),
    }
}

fn run_replay(args: ReplayArgs) -> Result<()> {
    let scene: SceneDescription = read_json(&args.scene)?;
    let script: replay::Script = read_json(&args.events)?;
    let config = match &args.config {
        Some(path) => read_json(path)?,
        None => DragConfig::default(),
    };

    let report = replay::replay(&scene, &script, config)?;
    let text = serde_json::to_string_pretty(&report).context("serialize replay report")?;
    match &args.out {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write report {}", path.display()))?;
            info!(path = %path.display(), "replay report written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn run_pick(args: PickArgs) -> Result<()> {
    let scene: SceneDescription = read_json(&args.scene)?;
    let report = replay::pick(&scene, args.x, args.y)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("serialize pick report")?
    );
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
