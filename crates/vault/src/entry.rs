use std::sync::Arc;

use crate::VaultPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
	Folder,
	File,
}

/// One node of the tree as seen by a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	pub path: VaultPath,
	pub kind: EntryKind,
}

impl Entry {
	pub fn folder(path: impl Into<VaultPath>) -> Self {
		Self {
			path: path.into(),
			kind: EntryKind::Folder,
		}
	}

	pub fn file(path: impl Into<VaultPath>) -> Self {
		Self {
			path: path.into(),
			kind: EntryKind::File,
		}
	}

	pub fn is_folder(&self) -> bool {
		self.kind == EntryKind::Folder
	}

	pub fn is_file(&self) -> bool {
		self.kind == EntryKind::File
	}

	pub fn name(&self) -> &str {
		self.path.name()
	}
}

/// Immutable view of the tree produced fresh for each query.
///
/// Entries keep the backend's enumeration order. The root folder is implicit
/// and never appears in [`Snapshot::entries`].
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
	entries: Arc<[Entry]>,
}

impl Snapshot {
	pub fn new(entries: Vec<Entry>) -> Self {
		Self { entries: entries.into() }
	}

	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn folders(&self) -> impl Iterator<Item = &Entry> {
		self.entries.iter().filter(|entry| entry.is_folder())
	}

	pub fn files(&self) -> impl Iterator<Item = &Entry> {
		self.entries.iter().filter(|entry| entry.is_file())
	}

	pub fn kind_of(&self, path: &VaultPath) -> Option<EntryKind> {
		if path.is_root() {
			return Some(EntryKind::Folder);
		}
		self.entries.iter().find(|entry| &entry.path == path).map(|entry| entry.kind)
	}

	/// Direct children of `parent` in enumeration order.
	pub fn children<'a>(&'a self, parent: &'a VaultPath) -> impl Iterator<Item = &'a Entry> + 'a {
		self.entries
			.iter()
			.filter(move |entry| entry.path.parent().as_ref() == Some(parent))
	}
}

#[cfg(test)]
mod tests {
	use super::{Entry, EntryKind, Snapshot};
	use crate::VaultPath;

	fn sample() -> Snapshot {
		Snapshot::new(vec![
			Entry::folder("Projects"),
			Entry::folder("Projects/Alpha"),
			Entry::file("Projects/Alpha/Alpha.md"),
			Entry::folder("Projects/Beta"),
			Entry::file("Inbox.md"),
		])
	}

	#[test]
	fn kind_of_treats_root_as_folder() {
		let snapshot = sample();
		assert_eq!(snapshot.kind_of(&VaultPath::root()), Some(EntryKind::Folder));
		assert_eq!(snapshot.kind_of(&VaultPath::new("Inbox.md")), Some(EntryKind::File));
		assert_eq!(snapshot.kind_of(&VaultPath::new("Missing")), None);
	}

	#[test]
	fn children_are_direct_only() {
		let snapshot = sample();
		let projects = VaultPath::new("Projects");
		let names: Vec<&str> = snapshot.children(&projects).map(Entry::name).collect();
		assert_eq!(names, vec!["Alpha", "Beta"]);

		let root = VaultPath::root();
		let names: Vec<&str> = snapshot.children(&root).map(Entry::name).collect();
		assert_eq!(names, vec!["Projects", "Inbox.md"]);
	}

	#[test]
	fn folder_and_file_views_partition_entries() {
		let snapshot = sample();
		assert_eq!(snapshot.folders().count() + snapshot.files().count(), snapshot.len());
	}
}
