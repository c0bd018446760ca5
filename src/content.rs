use serde::Deserialize;

/// A loaded export source: the markdown body to export and the title
/// resolved for it. Frontmatter, when present, is stripped from the body
/// and consulted only for the title.
#[derive(Debug, Clone)]
pub struct Document {
	pub title: String,
	pub body: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct Frontmatter {
	title: Option<String>,
}

impl Document {
	/// Build a document from raw input. Title precedence: explicit override,
	/// frontmatter `title`, first `#` heading, then the fallback (usually
	/// the input file stem).
	pub fn new(raw: &str, title_override: Option<String>, fallback_title: &str) -> Self {
		let (frontmatter, body) = extract_frontmatter(raw);

		let title = title_override
			.or(frontmatter.title)
			.or_else(|| first_heading(&body))
			.unwrap_or_else(|| fallback_title.to_string());

		Self { title, body }
	}
}

/// Split optional frontmatter off the markdown source. Supports YAML
/// (`---`), TOML (`+++`) and fenced JSON blocks; anything unparseable is
/// treated as plain content.
fn extract_frontmatter(content: &str) -> (Frontmatter, String) {
	if content.starts_with("---\n") {
		if let Some(end) = content[4..].find("\n---\n") {
			let frontmatter_str = &content[4..end + 4];
			let markdown = &content[end + 9..];
			if let Ok(frontmatter) = serde_yaml::from_str::<Frontmatter>(frontmatter_str) {
				return (frontmatter, markdown.to_string());
			}
		}
	}

	if content.starts_with("+++\n") {
		if let Some(end) = content[4..].find("\n+++\n") {
			let frontmatter_str = &content[4..end + 4];
			let markdown = &content[end + 9..];
			if let Ok(frontmatter) = toml::from_str::<Frontmatter>(frontmatter_str) {
				return (frontmatter, markdown.to_string());
			}
		}
	}

	if content.starts_with("```json\n") {
		if let Some(end) = content.find("\n```\n") {
			let frontmatter_str = &content[8..end];
			let markdown = &content[end + 5..];
			if let Ok(frontmatter) = serde_json::from_str::<Frontmatter>(frontmatter_str) {
				return (frontmatter, markdown.to_string());
			}
		}
	}

	(Frontmatter::default(), content.to_string())
}

fn first_heading(markdown: &str) -> Option<String> {
	for line in markdown.lines() {
		if let Some(heading) = line.trim().strip_prefix("# ") {
			let heading = heading.trim();
			if !heading.is_empty() {
				return Some(heading.to_string());
			}
		}
	}
	None
}
