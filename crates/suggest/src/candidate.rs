//! Suggestion entries.

use vae_vault::EntryKind;

/// One suggestion offered while typing.
///
/// `path` is what gets committed; `display` is the label shown in the panel.
/// Candidates are snapshots of a single query and are not kept in sync with
/// the vault afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	pub path: String,
	pub display: String,
	pub kind: EntryKind,
}

impl Candidate {
	pub fn folder(path: impl Into<String>, display: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			display: display.into(),
			kind: EntryKind::Folder,
		}
	}

	pub fn file(path: impl Into<String>, display: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			display: display.into(),
			kind: EntryKind::File,
		}
	}

	/// Secondary line for the panel, present only when it adds information.
	pub fn detail(&self) -> Option<&str> {
		(self.path != self.display).then_some(self.path.as_str())
	}
}
