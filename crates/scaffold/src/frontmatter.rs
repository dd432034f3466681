//! YAML frontmatter editing.
//!
//! A note starts with frontmatter when its first line is `---`; the block runs
//! to the next line that is exactly `---`. Keys keep their order when edited
//! and new keys are appended.

use serde_yaml::{Mapping, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FrontmatterError {
	#[error("frontmatter is not valid YAML: {0}")]
	Yaml(#[from] serde_yaml::Error),

	#[error("frontmatter is not a key/value mapping")]
	NotAMapping,
}

/// A note split into frontmatter and body.
#[derive(Debug, Clone, Default)]
pub struct Document {
	frontmatter: Mapping,
	body: String,
}

impl Document {
	pub fn parse(content: &str) -> Result<Self, FrontmatterError> {
		let Some((yaml, body)) = split(content) else {
			return Ok(Self {
				frontmatter: Mapping::new(),
				body: content.to_string(),
			});
		};
		let frontmatter = match serde_yaml::from_str::<Value>(yaml)? {
			Value::Null => Mapping::new(),
			Value::Mapping(mapping) => mapping,
			_ => return Err(FrontmatterError::NotAMapping),
		};
		Ok(Self {
			frontmatter,
			body: body.to_string(),
		})
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.frontmatter.get(key).and_then(Value::as_str)
	}

	pub fn set(&mut self, key: &str, value: &str) {
		self.frontmatter.insert(Value::String(key.to_string()), Value::String(value.to_string()));
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.frontmatter.keys().filter_map(Value::as_str)
	}

	pub fn body(&self) -> &str {
		&self.body
	}

	pub fn body_mut(&mut self) -> &mut String {
		&mut self.body
	}

	/// Serializes back to note text. An empty mapping drops the block.
	pub fn render(&self) -> Result<String, FrontmatterError> {
		if self.frontmatter.is_empty() {
			return Ok(self.body.clone());
		}
		let yaml = serde_yaml::to_string(&self.frontmatter)?;
		Ok(format!("---\n{}\n---\n{}", yaml.trim_end_matches('\n'), self.body))
	}
}

/// Returns `(yaml, body)` when `content` opens with a closed frontmatter block.
fn split(content: &str) -> Option<(&str, &str)> {
	let rest = content.strip_prefix("---\n").or_else(|| content.strip_prefix("---\r\n"))?;

	let mut offset = 0;
	for line in rest.split_inclusive('\n') {
		if line.trim_end_matches(['\r', '\n']) == "---" {
			return Some((&rest[..offset], &rest[offset + line.len()..]));
		}
		offset += line.len();
	}
	None
}
