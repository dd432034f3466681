//! Candidate sources.
//!
//! Every query takes a fresh [`Snapshot`] and filters it with a plain
//! case-insensitive substring test. There is no scoring: results keep the
//! tree's enumeration order and are capped at [`MAX_SUGGESTIONS`].

use std::sync::Arc;

use vae_vault::{Entry, EntryKind, Snapshot, Vault, VaultPath};

use crate::Candidate;

/// Upper bound on candidates returned by any query.
pub const MAX_SUGGESTIONS: usize = 10;

/// Label of the synthetic root folder candidate.
pub const ROOT_LABEL: &str = "/ (Root)";

/// Anything that can turn typed text into an ordered candidate list.
pub trait SuggestionSource {
	fn suggest(&self, query: &str) -> Vec<Candidate>;
}

impl<T: SuggestionSource + ?Sized> SuggestionSource for Box<T> {
	fn suggest(&self, query: &str) -> Vec<Candidate> {
		(**self).suggest(query)
	}
}

/// Adapts a closure into a [`SuggestionSource`].
pub struct FnSource<F>(pub F);

impl<F> SuggestionSource for FnSource<F>
where
	F: Fn(&str) -> Vec<Candidate>,
{
	fn suggest(&self, query: &str) -> Vec<Candidate> {
		(self.0)(query)
	}
}

/// The subset of the tree a query searches.
pub trait Scope {
	fn candidates(&self, tree: &Snapshot, query: &str) -> Vec<Candidate>;
}

/// Pairs a vault with a scope; every call re-reads the live tree.
pub struct VaultSource<S> {
	vault: Arc<dyn Vault>,
	scope: S,
}

impl<S: Scope> VaultSource<S> {
	pub fn new(vault: Arc<dyn Vault>, scope: S) -> Self {
		Self { vault, scope }
	}

	pub fn scope(&self) -> &S {
		&self.scope
	}
}

impl<S: Scope> SuggestionSource for VaultSource<S> {
	fn suggest(&self, query: &str) -> Vec<Candidate> {
		let tree = self.vault.snapshot();
		let candidates = self.scope.candidates(&tree, query);
		tracing::trace!(query, scanned = tree.len(), matched = candidates.len(), "suggest.query");
		candidates
	}
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
	haystack.to_lowercase().contains(needle)
}

/// Every folder whose name or full path contains the query.
///
/// The synthetic root is offered only for a non-empty query that is `/` or a
/// substring of [`ROOT_LABEL`]; it is committed as `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FolderScope;

impl Scope for FolderScope {
	fn candidates(&self, tree: &Snapshot, query: &str) -> Vec<Candidate> {
		let needle = query.to_lowercase();
		let mut out = Vec::new();

		if !query.is_empty() && (query == "/" || contains_folded(ROOT_LABEL, &needle)) {
			out.push(Candidate::folder(VaultPath::root().as_str(), ROOT_LABEL));
		}

		out.extend(
			tree.folders()
				.filter(|folder| contains_folded(folder.name(), &needle) || contains_folded(folder.path.as_str(), &needle))
				.map(|folder| Candidate::folder(folder.path.as_str(), folder.name())),
		);
		out.truncate(MAX_SUGGESTIONS);
		out
	}
}

/// Files, optionally restricted to paths ending in `extension`, whose stem or
/// full path contains the query. An empty query lists files by ascending path.
#[derive(Debug, Clone, Default)]
pub struct FileScope {
	extension: Option<String>,
}

impl FileScope {
	pub fn any() -> Self {
		Self::default()
	}

	pub fn with_extension(extension: impl Into<String>) -> Self {
		let extension = extension.into();
		Self {
			extension: (!extension.is_empty()).then_some(extension),
		}
	}

	pub fn extension(&self) -> Option<&str> {
		self.extension.as_deref()
	}
}

impl Scope for FileScope {
	fn candidates(&self, tree: &Snapshot, query: &str) -> Vec<Candidate> {
		let needle = query.to_lowercase();
		let mut files: Vec<&Entry> = tree
			.files()
			.filter(|file| self.extension.as_deref().is_none_or(|ext| file.path.as_str().ends_with(ext)))
			.collect();
		if query.is_empty() {
			files.sort_by(|a, b| a.path.cmp(&b.path));
		}

		files
			.into_iter()
			.filter(|file| contains_folded(file.path.stem(), &needle) || contains_folded(file.path.as_str(), &needle))
			.take(MAX_SUGGESTIONS)
			.map(|file| Candidate::file(file.path.as_str(), file.path.stem()))
			.collect()
	}
}

/// Direct child folders of `parent`, committed by bare name.
///
/// A parent that is missing or not a folder yields no candidates.
#[derive(Debug, Clone)]
pub struct ChildFolderScope {
	parent: VaultPath,
}

impl ChildFolderScope {
	pub fn new(parent: impl Into<VaultPath>) -> Self {
		Self { parent: parent.into() }
	}

	pub fn parent(&self) -> &VaultPath {
		&self.parent
	}
}

impl Scope for ChildFolderScope {
	fn candidates(&self, tree: &Snapshot, query: &str) -> Vec<Candidate> {
		if tree.kind_of(&self.parent) != Some(EntryKind::Folder) {
			tracing::trace!(parent = %self.parent, "suggest.child_scope.unresolved");
			return Vec::new();
		}

		let needle = query.to_lowercase();
		tree.children(&self.parent)
			.filter(|child| child.is_folder() && contains_folded(child.name(), &needle))
			.take(MAX_SUGGESTIONS)
			.map(|child| Candidate::folder(child.name(), child.name()))
			.collect()
	}
}
