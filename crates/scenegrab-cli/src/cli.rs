use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scenegrab")]
#[command(about = "Replay pointer input against a scene and report what got dragged")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Feed a pointer script through the drag controller.
    Replay(ReplayArgs),
    /// Cast one pointer ray and list what it hits.
    Pick(PickArgs),
}

#[derive(Args)]
pub struct ReplayArgs {
    #[arg(long)]
    pub scene: PathBuf,
    #[arg(long)]
    pub events: PathBuf,
    /// Optional drag controller options as JSON.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Write the report here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct PickArgs {
    #[arg(long)]
    pub scene: PathBuf,
    #[arg(long)]
    pub x: f32,
    #[arg(long)]
    pub y: f32,
}
