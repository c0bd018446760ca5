use thiserror::Error;

/// Fixed user-facing message for a browser that could not be opened.
/// This is the terminal failure of the PDF path; there is no retry.
pub const BROWSER_UNAVAILABLE_TEXT: &str =
	"ブラウザを起動できませんでした。Chrome/Chromium がインストールされているか確認してから再試行してください。";

#[derive(Error, Debug)]
pub enum ExportError {
	/// The print browser could not be launched or refused a new tab.
	#[error("{}", BROWSER_UNAVAILABLE_TEXT)]
	BrowserUnavailable,

	/// Any failure after the print tab was opened. The tab is closed
	/// before this is raised; the original error text is preserved.
	#[error("Print failed: {0}")]
	Print(String),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML parsing error: {0}")]
	TomlParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
