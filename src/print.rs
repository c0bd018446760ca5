use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

use headless_chrome::types::PrintToPdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};

use crate::config::PrintConfig;
use crate::error::{ExportError, Result};

// A4 in inches for the print command; the CSS @page rule takes precedence
// via prefer_css_page_size.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;
const MARGIN_IN: f64 = 0.59; // 15mm

/// Drive one print orchestration: open a browser page at the configured
/// window size, load the composed document, wait for the load to finish,
/// wait the settling delay, then issue the print command. Returns the PDF
/// bytes. Blocking; callers run this on a blocking task.
///
/// The settle delay is a heuristic for asynchronous layout (web fonts,
/// images); there is no general completion signal to wait on instead.
pub fn print_document(document: &str, print: &PrintConfig) -> Result<Vec<u8>> {
	// Open. Launch failure is the terminal "no usable window" condition.
	let launch_options = LaunchOptions::default_builder()
		.headless(true)
		.window_size(Some((print.window_width, print.window_height)))
		.build()
		.map_err(|_| ExportError::BrowserUnavailable)?;
	let browser = Browser::new(launch_options).map_err(|_| ExportError::BrowserUnavailable)?;
	let tab = browser.new_tab().map_err(|_| ExportError::BrowserUnavailable)?;

	// Inject through a temp file; removed on drop regardless of outcome.
	let mut preview = tempfile::Builder::new()
		.prefix("mdpress-preview-")
		.suffix(".html")
		.tempfile()?;
	preview.write_all(document.as_bytes())?;
	preview.flush()?;

	// Past this point the tab exists; close it before surfacing any error
	// so a failed export does not leak an orphaned page.
	match drive_print(&tab, preview.path(), print) {
		Ok(pdf) => Ok(pdf),
		Err(e) => {
			let _ = tab.close(true);
			Err(e)
		}
	}
}

fn drive_print(tab: &Tab, preview_path: &Path, print: &PrintConfig) -> Result<Vec<u8>> {
	tab.navigate_to(&file_url(preview_path))
		.map_err(|e| ExportError::Print(e.to_string()))?;

	// AwaitReady, bounded by the tab's default navigation timeout.
	tab.wait_until_navigated()
		.map_err(|e| ExportError::Print(e.to_string()))?;

	// Settle before printing.
	thread::sleep(Duration::from_millis(print.settle_delay_ms));

	let options = PrintToPdfOptions {
		landscape: Some(false),
		display_header_footer: Some(false),
		print_background: Some(true),
		scale: Some(1.0),
		paper_width: Some(A4_WIDTH_IN),
		paper_height: Some(A4_HEIGHT_IN),
		margin_top: Some(MARGIN_IN),
		margin_bottom: Some(MARGIN_IN),
		margin_left: Some(MARGIN_IN),
		margin_right: Some(MARGIN_IN),
		prefer_css_page_size: Some(true),
		..Default::default()
	};

	tab.print_to_pdf(Some(options))
		.map_err(|e| ExportError::Print(e.to_string()))
}

fn file_url(path: &Path) -> String {
	let path_str = path.to_string_lossy().replace('\\', "/");
	if path_str.starts_with('/') {
		format!("file://{}", path_str)
	} else {
		format!("file:///{}", path_str)
	}
}
