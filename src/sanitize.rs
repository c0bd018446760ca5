//! Context-specific sanitizers. HTML-title safety and filename safety are
//! different concerns, so each context gets its own function. Both are
//! idempotent: sanitizing an already-sanitized string yields the same string.

const FILENAME_RESERVED: [char; 10] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|', '\0'];
const MAX_FILENAME_LEN: usize = 100;

/// Neutralize a title for embedding in an HTML `<title>` element. HTML
/// metacharacters and control characters are stripped rather than
/// entity-escaped, which keeps the operation idempotent.
pub fn sanitize_title(title: &str) -> String {
	title
		.chars()
		.filter(|c| !matches!(c, '<' | '>' | '&' | '"' | '\'') && !c.is_control())
		.collect::<String>()
		.trim()
		.to_string()
}

/// Make a title safe to use as a filename. Reserved characters become `-`,
/// spaces become `_`, an empty result falls back to "document".
pub fn safe_filename(title: &str) -> String {
	let mut s: String = title
		.trim()
		.chars()
		.map(|c| {
			if FILENAME_RESERVED.contains(&c) || c.is_control() {
				'-'
			} else if c == ' ' {
				'_'
			} else {
				c
			}
		})
		.collect();

	if s.is_empty() {
		s = "document".to_string();
	}
	if s.chars().count() > MAX_FILENAME_LEN {
		s = s.chars().take(MAX_FILENAME_LEN).collect();
	}
	s
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_sanitize_title_strips_metacharacters() {
		let sanitized = sanitize_title("<script>alert('x')</script> & \"quotes\"");
		assert!(!sanitized.contains('<'));
		assert!(!sanitized.contains('>'));
		assert!(!sanitized.contains('&'));
		assert!(!sanitized.contains('"'));
		assert!(!sanitized.contains('\''));
	}

	#[test]
	fn test_sanitize_title_idempotent() {
		let once = sanitize_title("Report <draft> & \"final\"");
		assert_eq!(sanitize_title(&once), once);
	}

	#[test]
	fn test_sanitize_title_keeps_plain_text() {
		assert_eq!(sanitize_title("会議メモ 2024"), "会議メモ 2024");
	}

	#[test]
	fn test_safe_filename_replaces_reserved() {
		assert_eq!(safe_filename("a/b\\c:d"), "a-b-c-d");
		assert_eq!(safe_filename("my report"), "my_report");
	}

	#[test]
	fn test_safe_filename_idempotent() {
		let once = safe_filename("notes: draft?");
		assert_eq!(safe_filename(&once), once);
	}

	#[test]
	fn test_safe_filename_empty_fallback() {
		assert_eq!(safe_filename(""), "document");
		assert_eq!(safe_filename("   "), "document");
	}

	#[test]
	fn test_safe_filename_truncates_on_char_boundary() {
		let long: String = "あ".repeat(200);
		let result = safe_filename(&long);
		assert_eq!(result.chars().count(), 100);
	}
}
