use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::compose;
use crate::config::Config;
use crate::content::Document;
use crate::export::Exporter;
use crate::notify::ConsoleNotifier;
use crate::sanitize::safe_filename;

#[derive(Parser)]
#[command(name = "mdpress")]
#[command(about = "Print-ready PDF preview and markdown export for documents")]
#[command(version)]
pub struct Cli {
	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Export a markdown document as PDF via a print-ready preview
	Pdf {
		/// Markdown file, or - for stdin
		input: PathBuf,

		/// Document title (default: frontmatter, first heading, or file stem)
		#[arg(short, long)]
		title: Option<String>,

		/// Output PDF path (default: {title}-{timestamp}.pdf)
		#[arg(short, long)]
		output: Option<PathBuf>,

		/// Configuration file
		#[arg(short, long)]
		config: Option<PathBuf>,
	},

	/// Export the raw markdown as a timestamped .md file
	Markdown {
		/// Markdown file, or - for stdin
		input: PathBuf,

		/// Document title (default: frontmatter, first heading, or file stem)
		#[arg(short, long)]
		title: Option<String>,

		/// Output directory (default: current directory)
		#[arg(short = 'd', long, default_value = ".")]
		output_dir: PathBuf,

		/// Configuration file
		#[arg(short, long)]
		config: Option<PathBuf>,
	},

	/// Write the composed print-preview HTML document
	Html {
		/// Markdown file, or - for stdin
		input: PathBuf,

		/// Document title (default: frontmatter, first heading, or file stem)
		#[arg(short, long)]
		title: Option<String>,

		/// Output HTML path (default: {title}-{timestamp}.html)
		#[arg(short, long)]
		output: Option<PathBuf>,

		/// Configuration file
		#[arg(short, long)]
		config: Option<PathBuf>,
	},

	/// Write a default mdpress.toml
	Init {
		/// Directory to initialize
		#[arg(default_value = ".")]
		dir: PathBuf,
	},
}

impl Cli {
	pub async fn run(self) -> Result<()> {
		match self.command {
			Commands::Pdf {
				input,
				title,
				output,
				config,
			} => {
				let config = Config::load(config.as_deref())?;
				let raw = read_input(&input)?;
				let doc = Document::new(&raw, title, &fallback_title(&input));
				let output = output.unwrap_or_else(|| default_output(&doc.title, "pdf"));

				let exporter = Exporter::new(config);
				if let Err(e) = exporter
					.export_pdf(&doc.body, &doc.title, &output, &ConsoleNotifier)
					.await
				{
					eprintln!("PDF export failed: {}", e);
					return Err(e.into());
				}
				println!("PDF saved: {}", output.display());
			}
			Commands::Markdown {
				input,
				title,
				output_dir,
				config,
			} => {
				let config = Config::load(config.as_deref())?;
				let raw = read_input(&input)?;
				let doc = Document::new(&raw, title, &fallback_title(&input));

				// The raw input is written verbatim; only the title goes
				// through resolution.
				let exporter = Exporter::new(config);
				let path = exporter.export_markdown(&raw, &doc.title, &output_dir)?;
				println!("Markdown saved: {}", path.display());
			}
			Commands::Html {
				input,
				title,
				output,
				config,
			} => {
				let config = Config::load(config.as_deref())?;
				let raw = read_input(&input)?;
				let doc = Document::new(&raw, title, &fallback_title(&input));
				let output = output.unwrap_or_else(|| default_output(&doc.title, "html"));

				let exporter = Exporter::new(config);
				exporter.export_html(&doc.body, &doc.title, &output)?;
				println!("Preview saved: {}", output.display());
			}
			Commands::Init { dir } => {
				let config_path = dir.join("mdpress.toml");
				let config = Config::default();
				config.save(&config_path)?;
				println!("Configuration file created: {}", config_path.display());
			}
		}
		Ok(())
	}
}

fn read_input(input: &Path) -> Result<String> {
	if input == Path::new("-") {
		let mut buf = String::new();
		std::io::stdin()
			.read_to_string(&mut buf)
			.context("Failed to read from stdin")?;
		Ok(buf)
	} else {
		fs::read_to_string(input)
			.with_context(|| format!("Failed to read file: {}", input.display()))
	}
}

fn fallback_title(input: &Path) -> String {
	input
		.file_stem()
		.and_then(|s| s.to_str())
		.filter(|s| *s != "-")
		.unwrap_or("document")
		.to_string()
}

fn default_output(title: &str, ext: &str) -> PathBuf {
	PathBuf::from(format!(
		"{}-{}.{}",
		safe_filename(title),
		compose::current_timestamp(),
		ext
	))
}
