use std::fmt;

const ROOT: &str = "/";

/// Normalized vault-relative path.
///
/// Separators are always `/`, there are no leading, trailing or repeated
/// separators and no `.` segments. The empty path is the root, spelled `/`.
/// `..` segments are kept verbatim so backends can reject them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VaultPath(String);

impl VaultPath {
	pub fn new(raw: &str) -> Self {
		let cleaned: String = raw
			.chars()
			.map(|ch| match ch {
				'\\' => '/',
				'\u{00A0}' | '\u{202F}' => ' ',
				other => other,
			})
			.collect();
		let segments: Vec<&str> = cleaned.split('/').filter(|segment| !segment.is_empty() && *segment != ".").collect();
		if segments.is_empty() {
			Self::root()
		} else {
			Self(segments.join("/"))
		}
	}

	pub fn root() -> Self {
		Self(ROOT.to_string())
	}

	pub fn is_root(&self) -> bool {
		self.0 == ROOT
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn segments(&self) -> impl Iterator<Item = &str> {
		self.0.split('/').filter(|segment| !segment.is_empty())
	}

	/// Returns true when any segment walks upwards.
	pub fn escapes(&self) -> bool {
		self.segments().any(|segment| segment == "..")
	}

	/// Final segment; empty for the root.
	pub fn name(&self) -> &str {
		if self.is_root() {
			return "";
		}
		self.0.rsplit('/').next().unwrap_or(&self.0)
	}

	/// Final segment without its last extension (`notes/Plan.v2.md` -> `Plan.v2`).
	pub fn stem(&self) -> &str {
		let name = self.name();
		match name.rfind('.') {
			Some(idx) if idx > 0 => &name[..idx],
			_ => name,
		}
	}

	/// Last extension of the final segment, without the dot.
	pub fn extension(&self) -> Option<&str> {
		let name = self.name();
		match name.rfind('.') {
			Some(idx) if idx > 0 => Some(&name[idx + 1..]),
			_ => None,
		}
	}

	pub fn parent(&self) -> Option<VaultPath> {
		if self.is_root() {
			return None;
		}
		match self.0.rfind('/') {
			Some(idx) => Some(Self(self.0[..idx].to_string())),
			None => Some(Self::root()),
		}
	}

	pub fn join(&self, child: &str) -> VaultPath {
		if self.is_root() {
			Self::new(child)
		} else {
			Self::new(&format!("{}/{child}", self.0))
		}
	}

	/// Ancestors from the top of the tree down to (excluding) this path. The root is skipped.
	pub fn ancestors(&self) -> Vec<VaultPath> {
		let mut out = Vec::new();
		let mut current = self.parent();
		while let Some(path) = current {
			if path.is_root() {
				break;
			}
			current = path.parent();
			out.push(path);
		}
		out.reverse();
		out
	}

	/// Returns true when `self` is `ancestor` or lives below it.
	pub fn starts_with(&self, ancestor: &VaultPath) -> bool {
		if ancestor.is_root() {
			return true;
		}
		self.0 == ancestor.0 || self.0.strip_prefix(ancestor.as_str()).is_some_and(|rest| rest.starts_with('/'))
	}
}

impl fmt::Display for VaultPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for VaultPath {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl From<&str> for VaultPath {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}

impl From<String> for VaultPath {
	fn from(raw: String) -> Self {
		Self::new(&raw)
	}
}

#[cfg(test)]
mod tests {
	use super::VaultPath;

	#[test]
	fn new_strips_outer_and_repeated_separators() {
		assert_eq!(VaultPath::new("/My Projects/").as_str(), "My Projects");
		assert_eq!(VaultPath::new("a//b///c").as_str(), "a/b/c");
		assert_eq!(VaultPath::new("a\\b\\c.md").as_str(), "a/b/c.md");
		assert_eq!(VaultPath::new("./a/./b").as_str(), "a/b");
	}

	#[test]
	fn empty_and_slash_are_root() {
		assert!(VaultPath::new("").is_root());
		assert!(VaultPath::new("/").is_root());
		assert!(VaultPath::new("//").is_root());
		assert_eq!(VaultPath::root().to_string(), "/");
	}

	#[test]
	fn non_breaking_spaces_become_spaces() {
		assert_eq!(VaultPath::new("Jane\u{00A0}Doe").as_str(), "Jane Doe");
	}

	#[test]
	fn name_stem_and_extension() {
		let path = VaultPath::new("Projects/Alpha/Plan.v2.md");
		assert_eq!(path.name(), "Plan.v2.md");
		assert_eq!(path.stem(), "Plan.v2");
		assert_eq!(path.extension(), Some("md"));

		let dotfile = VaultPath::new(".obsidian");
		assert_eq!(dotfile.stem(), ".obsidian");
		assert_eq!(dotfile.extension(), None);
	}

	#[test]
	fn parent_walks_to_root() {
		let path = VaultPath::new("a/b");
		assert_eq!(path.parent(), Some(VaultPath::new("a")));
		assert_eq!(VaultPath::new("a").parent(), Some(VaultPath::root()));
		assert_eq!(VaultPath::root().parent(), None);
	}

	#[test]
	fn join_from_root_and_nested() {
		assert_eq!(VaultPath::root().join("People").as_str(), "People");
		assert_eq!(VaultPath::new("People").join("Jane Doe/Media").as_str(), "People/Jane Doe/Media");
	}

	#[test]
	fn ancestors_are_top_down() {
		let ancestors = VaultPath::new("a/b/c/d.md").ancestors();
		let names: Vec<&str> = ancestors.iter().map(VaultPath::as_str).collect();
		assert_eq!(names, vec!["a", "a/b", "a/b/c"]);
	}

	#[test]
	fn starts_with_respects_segment_boundaries() {
		let path = VaultPath::new("Projects/Alpha/Notes");
		assert!(path.starts_with(&VaultPath::new("Projects")));
		assert!(path.starts_with(&VaultPath::new("Projects/Alpha/Notes")));
		assert!(!path.starts_with(&VaultPath::new("Proj")));
		assert!(path.starts_with(&VaultPath::root()));
	}

	#[test]
	fn parent_segments_are_detected() {
		assert!(VaultPath::new("../outside").escapes());
		assert!(!VaultPath::new("a/b").escapes());
	}
}
