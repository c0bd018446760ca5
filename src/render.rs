use pulldown_cmark::{html, Options, Parser};

/// Convert markdown to an HTML fragment with the fixed rendering
/// configuration: GitHub-flavored extensions enabled, soft line breaks left
/// as spaces (no hard-break conversion), lenient parsing of malformed
/// constructs. pulldown-cmark has no failure mode for text input, so this
/// never errors.
pub fn markdown_to_html(markdown: &str) -> String {
	let mut options = Options::empty();
	options.insert(Options::ENABLE_STRIKETHROUGH);
	options.insert(Options::ENABLE_TABLES);
	options.insert(Options::ENABLE_TASKLISTS);
	options.insert(Options::ENABLE_FOOTNOTES);

	let parser = Parser::new_ext(markdown, options);
	let mut html_output = String::new();
	html::push_html(&mut html_output, parser);

	html_output
}
