use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{ExportError, Result};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
	#[serde(default)]
	pub print: PrintConfig,
	#[serde(default)]
	pub test_mode: TestModeConfig,
}

/// Print layout settings. The settle delay is a best-effort heuristic for
/// asynchronous layout (web fonts, images), not a completion signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintConfig {
	#[serde(default = "default_page_size")]
	pub page_size: String,
	#[serde(default = "default_margin")]
	pub margin: String,
	#[serde(default = "default_settle_delay_ms")]
	pub settle_delay_ms: u64,
	#[serde(default = "default_window_width")]
	pub window_width: u32,
	#[serde(default = "default_window_height")]
	pub window_height: u32,
}

/// Automated-test bypass. The explicit flag is preferred; the client
/// allow-list matches the identification string in MDPRESS_CLIENT.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestModeConfig {
	#[serde(default)]
	pub enabled: bool,
	#[serde(default = "default_test_clients")]
	pub clients: Vec<String>,
}

fn default_page_size() -> String {
	"A4".to_string()
}

fn default_margin() -> String {
	"15mm".to_string()
}

fn default_settle_delay_ms() -> u64 {
	500
}

fn default_window_width() -> u32 {
	800
}

fn default_window_height() -> u32 {
	600
}

fn default_test_clients() -> Vec<String> {
	vec!["HeadlessChrome".to_string(), "Playwright".to_string()]
}

impl Default for PrintConfig {
	fn default() -> Self {
		Self {
			page_size: default_page_size(),
			margin: default_margin(),
			settle_delay_ms: default_settle_delay_ms(),
			window_width: default_window_width(),
			window_height: default_window_height(),
		}
	}
}

impl Default for TestModeConfig {
	fn default() -> Self {
		Self {
			enabled: false,
			clients: default_test_clients(),
		}
	}
}

impl Config {
	/// Load configuration. No path and no mdpress.toml in the current
	/// directory means defaults; a present but malformed file is an error.
	pub fn load(path: Option<&Path>) -> Result<Self> {
		let path = match path {
			Some(p) => p.to_path_buf(),
			None => {
				let default = Path::new("mdpress.toml");
				if !default.exists() {
					return Ok(Self::default());
				}
				default.to_path_buf()
			}
		};

		let content = fs::read_to_string(&path).map_err(|e| {
			ExportError::Config(format!("Cannot read config from '{}': {}", path.display(), e))
		})?;
		let config: Config = toml::from_str(&content)?;
		Ok(config)
	}

	pub fn save(&self, path: &Path) -> Result<()> {
		let toml = toml::to_string_pretty(self)
			.map_err(|e| ExportError::Config(format!("Failed to serialize config: {}", e)))?;
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent)?;
		}
		fs::write(path, toml)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use tempfile::TempDir;

	#[test]
	fn test_defaults() {
		let config = Config::default();
		assert_eq!(config.print.page_size, "A4");
		assert_eq!(config.print.margin, "15mm");
		assert_eq!(config.print.settle_delay_ms, 500);
		assert_eq!(config.print.window_width, 800);
		assert_eq!(config.print.window_height, 600);
		assert!(!config.test_mode.enabled);
		assert_eq!(config.test_mode.clients, vec!["HeadlessChrome", "Playwright"]);
	}

	#[test]
	fn test_roundtrip() {
		let temp = TempDir::new().unwrap();
		let config_path = temp.path().join("mdpress.toml");

		let mut config = Config::default();
		config.print.settle_delay_ms = 250;
		config.save(&config_path).unwrap();

		let loaded = Config::load(Some(&config_path)).unwrap();
		assert_eq!(loaded.print.settle_delay_ms, 250);
	}

	#[test]
	fn test_partial_config_fills_defaults() {
		let temp = TempDir::new().unwrap();
		let config_path = temp.path().join("mdpress.toml");
		fs::write(&config_path, "[print]\nsettle_delay_ms = 100\n").unwrap();

		let loaded = Config::load(Some(&config_path)).unwrap();
		assert_eq!(loaded.print.settle_delay_ms, 100);
		assert_eq!(loaded.print.page_size, "A4");
	}

	#[test]
	fn test_missing_explicit_config_is_error() {
		let result = Config::load(Some(Path::new("/nonexistent/mdpress.toml")));
		assert!(result.is_err());
	}
}
