//! File and folder name cleanup.

use crate::error::{Result, ScaffoldError};

const ILLEGAL: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Strips characters that are illegal in file or folder names and collapses
/// runs of whitespace to a single space. Leading dots are dropped so the
/// result is never hidden and never a `.`/`..` segment.
///
/// Fails with [`ScaffoldError::EmptyName`] when nothing is left.
pub fn sanitize_name(raw: &str) -> Result<String> {
	let kept: String = raw
		.chars()
		.filter(|ch| !ILLEGAL.contains(ch) && (!ch.is_control() || ch.is_whitespace()))
		.collect();
	let clean = kept.split_whitespace().collect::<Vec<_>>().join(" ");
	let clean = clean.trim_start_matches('.').trim_start().to_string();
	if clean.is_empty() {
		return Err(ScaffoldError::EmptyName);
	}
	Ok(clean)
}

#[cfg(test)]
mod tests {
	use super::sanitize_name;
	use crate::ScaffoldError;

	#[test]
	fn strips_illegal_characters_and_collapses_space() {
		assert_eq!(sanitize_name("Jane: Doe").unwrap(), "Jane Doe");
		assert_eq!(sanitize_name("  a/b\\c  *d?\t\"e\" ").unwrap(), "abc d e");
		assert_eq!(sanitize_name("<Q1|Q2>").unwrap(), "Q1Q2");
	}

	#[test]
	fn tabs_and_newlines_separate_words() {
		assert_eq!(sanitize_name("Weekly\tsync\r\nnotes").unwrap(), "Weekly sync notes");
		assert_eq!(sanitize_name("a\u{7}b\tc").unwrap(), "ab c");
	}

	#[test]
	fn keeps_unicode_and_punctuation() {
		assert_eq!(sanitize_name("Zoë's plan (v2).").unwrap(), "Zoë's plan (v2).");
	}

	#[test]
	fn nothing_left_is_an_error() {
		assert!(matches!(sanitize_name(" :/ "), Err(ScaffoldError::EmptyName)));
		assert!(matches!(sanitize_name("\n\t"), Err(ScaffoldError::EmptyName)));
		assert!(matches!(sanitize_name(".."), Err(ScaffoldError::EmptyName)));
	}

	#[test]
	fn leading_dots_are_dropped() {
		assert_eq!(sanitize_name(".. hidden").unwrap(), "hidden");
	}
}
