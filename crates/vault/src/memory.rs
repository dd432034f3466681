use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::{Entry, EntryKind, Result, Snapshot, Vault, VaultError, VaultPath};

#[derive(Debug, Clone)]
enum Node {
	Folder,
	File(String),
}

impl Node {
	fn kind(&self) -> EntryKind {
		match self {
			Self::Folder => EntryKind::Folder,
			Self::File(_) => EntryKind::File,
		}
	}
}

/// In-memory vault that enumerates entries in insertion order.
///
/// Used by hosts that mirror a tree they do not own on disk, and by tests that
/// need a deterministic enumeration order.
#[derive(Debug, Default)]
pub struct MemoryVault {
	nodes: RwLock<IndexMap<VaultPath, Node>>,
}

impl MemoryVault {
	pub fn new() -> Self {
		Self::default()
	}

	/// Seeds a folder (and missing ancestors). Existing folders are left alone.
	pub fn insert_folder(&self, path: &str) -> Result<()> {
		let path = VaultPath::new(path);
		let mut nodes = self.nodes.write();
		ensure_ancestors(&mut nodes, &path)?;
		match nodes.get(&path) {
			Some(Node::File(_)) => Err(VaultError::NotAFolder(path)),
			Some(Node::Folder) => Ok(()),
			None => {
				if !path.is_root() {
					nodes.insert(path, Node::Folder);
				}
				Ok(())
			}
		}
	}

	/// Seeds a file (and missing ancestor folders), replacing any previous content.
	pub fn insert_file(&self, path: &str, content: &str) -> Result<()> {
		let path = VaultPath::new(path);
		let mut nodes = self.nodes.write();
		ensure_ancestors(&mut nodes, &path)?;
		if let Some(Node::Folder) = nodes.get(&path) {
			return Err(VaultError::NotAFile(path));
		}
		nodes.insert(path, Node::File(content.to_string()));
		Ok(())
	}

	/// Current text of a file, if present.
	pub fn contents(&self, path: &str) -> Option<String> {
		match self.nodes.read().get(&VaultPath::new(path)) {
			Some(Node::File(content)) => Some(content.clone()),
			_ => None,
		}
	}

	fn parent_must_be_folder(nodes: &IndexMap<VaultPath, Node>, path: &VaultPath) -> Result<()> {
		let Some(parent) = path.parent() else {
			return Err(VaultError::AlreadyExists(VaultPath::root()));
		};
		if parent.is_root() {
			return Ok(());
		}
		match nodes.get(&parent) {
			Some(Node::Folder) => Ok(()),
			Some(Node::File(_)) => Err(VaultError::NotAFolder(parent)),
			None => Err(VaultError::NotFound(parent)),
		}
	}
}

fn ensure_ancestors(nodes: &mut IndexMap<VaultPath, Node>, path: &VaultPath) -> Result<()> {
	for ancestor in path.ancestors() {
		match nodes.get(&ancestor) {
			Some(Node::Folder) => {}
			Some(Node::File(_)) => return Err(VaultError::NotAFolder(ancestor)),
			None => {
				nodes.insert(ancestor, Node::Folder);
			}
		}
	}
	Ok(())
}

#[async_trait]
impl Vault for MemoryVault {
	fn resolve(&self, path: &VaultPath) -> Option<EntryKind> {
		if path.is_root() {
			return Some(EntryKind::Folder);
		}
		self.nodes.read().get(path).map(Node::kind)
	}

	fn snapshot(&self) -> Snapshot {
		let nodes = self.nodes.read();
		Snapshot::new(
			nodes
				.iter()
				.map(|(path, node)| Entry {
					path: path.clone(),
					kind: node.kind(),
				})
				.collect(),
		)
	}

	async fn create_folder(&self, path: &VaultPath) -> Result<()> {
		if path.escapes() {
			return Err(VaultError::OutsideVault(path.clone()));
		}
		let mut nodes = self.nodes.write();
		if path.is_root() || nodes.contains_key(path) {
			return Err(VaultError::AlreadyExists(path.clone()));
		}
		ensure_ancestors(&mut nodes, path)?;
		nodes.insert(path.clone(), Node::Folder);
		Ok(())
	}

	async fn create_file(&self, path: &VaultPath, content: &str) -> Result<()> {
		if path.escapes() {
			return Err(VaultError::OutsideVault(path.clone()));
		}
		let mut nodes = self.nodes.write();
		if path.is_root() || nodes.contains_key(path) {
			return Err(VaultError::AlreadyExists(path.clone()));
		}
		Self::parent_must_be_folder(&nodes, path)?;
		nodes.insert(path.clone(), Node::File(content.to_string()));
		Ok(())
	}

	async fn read(&self, path: &VaultPath) -> Result<String> {
		match self.nodes.read().get(path) {
			Some(Node::File(content)) => Ok(content.clone()),
			Some(Node::Folder) => Err(VaultError::NotAFile(path.clone())),
			None if path.is_root() => Err(VaultError::NotAFile(path.clone())),
			None => Err(VaultError::NotFound(path.clone())),
		}
	}

	async fn modify(&self, path: &VaultPath, content: &str) -> Result<()> {
		let mut nodes = self.nodes.write();
		match nodes.get_mut(path) {
			Some(Node::File(existing)) => {
				*existing = content.to_string();
				Ok(())
			}
			Some(Node::Folder) => Err(VaultError::NotAFile(path.clone())),
			None => Err(VaultError::NotFound(path.clone())),
		}
	}

	async fn rename(&self, from: &VaultPath, to: &VaultPath) -> Result<()> {
		if to.escapes() {
			return Err(VaultError::OutsideVault(to.clone()));
		}
		let mut nodes = self.nodes.write();
		if !nodes.contains_key(from) {
			return Err(VaultError::NotFound(from.clone()));
		}
		if to.is_root() || nodes.contains_key(to) {
			return Err(VaultError::AlreadyExists(to.clone()));
		}
		if to.starts_with(from) {
			return Err(VaultError::NotAFolder(to.clone()));
		}
		Self::parent_must_be_folder(&nodes, to)?;

		// Rebuild so moved entries keep their enumeration slots.
		let previous = std::mem::take(&mut *nodes);
		for (path, node) in previous {
			let moved = if path.starts_with(from) {
				let rest = &path.as_str()[from.as_str().len()..];
				VaultPath::new(&format!("{}{rest}", to.as_str()))
			} else {
				path
			};
			nodes.insert(moved, node);
		}
		Ok(())
	}
}
