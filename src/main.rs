mod cli;
mod compose;
mod config;
mod content;
mod error;
mod export;
mod notify;
mod print;
mod render;
mod sanitize;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
	let cli = Cli::parse();
	cli.run().await
}
