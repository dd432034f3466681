//! Vault file tree.
//!
//! The vault is the hierarchical document store every other crate operates
//! over. This crate owns three things:
//!
//! - [`VaultPath`]: normalized, slash-separated, vault-relative paths.
//! - [`Snapshot`]: an immutable view of the tree taken for a single call.
//! - [`Vault`]: the provider trait (resolve, list, create, read, modify, rename)
//!   with an on-disk backend ([`FsVault`]) and an ordered in-memory backend
//!   ([`MemoryVault`]).
//!
//! Nothing here caches between calls. Callers that need to look at many
//! entries take a fresh [`Snapshot`] and drop it when done.

mod entry;
mod error;
mod fs;
mod memory;
mod path;

use async_trait::async_trait;
pub use entry::{Entry, EntryKind, Snapshot};
pub use error::{Result, VaultError};
pub use fs::FsVault;
pub use memory::MemoryVault;
pub use path::VaultPath;

/// File-tree provider consumed by suggestion sources and scaffolding.
///
/// Lookups and snapshots are synchronous; mutations and content reads are
/// the only suspension points.
#[async_trait]
pub trait Vault: Send + Sync {
	/// Resolves a path against the live tree. The root always resolves to a folder.
	fn resolve(&self, path: &VaultPath) -> Option<EntryKind>;

	/// Lists every entry (excluding the root) in natural enumeration order.
	fn snapshot(&self) -> Snapshot;

	/// Creates a folder and any missing ancestors.
	///
	/// Fails with [`VaultError::AlreadyExists`] when the folder is already present.
	async fn create_folder(&self, path: &VaultPath) -> Result<()>;

	/// Creates a new file. The parent folder must exist.
	async fn create_file(&self, path: &VaultPath, content: &str) -> Result<()>;

	/// Reads the full text of a file.
	async fn read(&self, path: &VaultPath) -> Result<String>;

	/// Replaces the text of an existing file.
	async fn modify(&self, path: &VaultPath, content: &str) -> Result<()>;

	/// Moves an entry. The destination must not exist and its parent must be a folder.
	async fn rename(&self, from: &VaultPath, to: &VaultPath) -> Result<()>;
}
