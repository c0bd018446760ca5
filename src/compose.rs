use chrono::Local;

use crate::config::PrintConfig;
use crate::sanitize::sanitize_title;

/// Sortable timestamp used in document titles and export filenames.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

const BASE_CSS: &str = include_str!("../assets/markdown.css");

const PREVIEW_TITLE: &str = "📄 PDF印刷プレビュー";
const PREVIEW_DESCRIPTION: &str = "このページを印刷してPDFとして保存してください。";
const PRINT_BUTTON: &str = "🖨️ 印刷 / PDF保存";

pub fn current_timestamp() -> String {
	Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Build the complete standalone preview document: base stylesheet plus
/// print CSS, the screen-only instructional banner, and the rendered
/// markdown inside an article. The rendered fragment is embedded verbatim;
/// only the title is sanitized here.
pub fn compose_document(html_body: &str, title: &str, print: &PrintConfig) -> String {
	let timestamp = current_timestamp();
	let page_title = sanitize_title(&format!("{}-{}", title, timestamp));

	format!(
		r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{page_title}</title>
<style>
{css}
</style>
</head>
<body>
{banner}
<article class="markdown-body">
{html_body}
</article>
</body>
</html>
"#,
		page_title = page_title,
		css = print_css(print),
		banner = preview_banner(),
		html_body = html_body,
	)
}

/// Base stylesheet plus the fixed print rules: A4 portrait page box,
/// screen/print visibility toggles, wrapped code blocks, repeating table
/// headers.
fn print_css(print: &PrintConfig) -> String {
	format!(
		r#"{base}

body {{
	font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', 'Noto Sans', Helvetica, Arial, sans-serif;
	line-height: 1.6;
	background: white;
	-webkit-print-color-adjust: exact;
	print-color-adjust: exact;
}}

.markdown-body {{
	box-sizing: border-box;
}}

img {{
	max-width: 100%;
	height: auto;
}}

pre, code {{
	white-space: pre-wrap;
	word-wrap: break-word;
}}

pre {{
	overflow: visible;
}}

thead {{
	display: table-header-group;
}}

@media screen {{
	body {{
		max-width: 800px;
		margin: 0 auto;
		padding: 20px;
	}}

	.print-only {{
		display: none;
	}}

	.screen-only {{
		display: block;
	}}
}}

@media print {{
	@page {{
		size: {page_size} portrait;
		margin: {margin};
	}}

	body {{
		margin: 0;
		padding: 0;
		max-width: none;
		background: white !important;
	}}

	.markdown-body {{
		max-width: none !important;
		margin: 0 !important;
		padding: 0 !important;
	}}

	.print-only {{
		display: block !important;
	}}

	.screen-only {{
		display: none !important;
	}}
}}
"#,
		base = BASE_CSS,
		page_size = print.page_size,
		margin = print.margin,
	)
}

/// Screen-only banner shown above the article: a print button for browsers
/// that suppress the automatic dialog, and share-sheet guidance for in-app
/// browsers that cannot print at all. Hidden on print media.
fn preview_banner() -> String {
	format!(
		r#"<div class="screen-only">
<div style="background: #f8f9fa; border: 1px solid #e9ecef; border-radius: 8px; padding: 20px; margin-bottom: 20px;">
<h1 style="margin-top: 0; color: #495057; font-size: 25px;">{title}</h1>
<p style="margin-bottom: 20px; color: #6c757d;">{description}</p>
<div style="background: #f0f8ff; border: 1px solid #b3d9ff; border-radius: 6px; padding: 16px; margin-bottom: 20px;">
<h3 style="margin: 0 0 12px 0; color: #0066cc; font-size: 18px;">🖨️ 自動的に印刷ダイアログが表示されない場合</h3>
<button onclick="window.print()" style="background: #0066cc; color: white; border: none; padding: 12px 24px; border-radius: 6px; cursor: pointer; font-size: 16px; font-weight: 500;">{button}</button>
</div>
<div style="background: #e8f5e8; border: 1px solid #c3e6c3; border-radius: 6px; padding: 16px;">
<h3 style="margin: 0 0 12px 0; color: #2d5a2d; font-size: 18px;">📱 アプリ内ブラウザで印刷する場合</h3>
<p style="margin: 0 0 12px 0; color: #2d5a2d; font-size: 14px;">アプリ内ブラウザでは印刷がサポートされていません。<br>Safariなどで改めて開くか、以下の手順で印刷してください。</p>
<ol style="margin: 0; padding-left: 20px; color: #2d5a2d; line-height: 1.6;">
<li>シェアボタン（□↑）をタップ</li>
<li>メニューから「プリント」を選択</li>
<li>プリンターを選択して印刷、またはPDFとして保存</li>
</ol>
</div>
</div>
<hr style="margin: 20px 0; border: none; border-top: 1px solid #dee2e6;">
</div>"#,
		title = PREVIEW_TITLE,
		description = PREVIEW_DESCRIPTION,
		button = PRINT_BUTTON,
	)
}
