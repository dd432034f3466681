use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ignore::WalkBuilder;
use tokio::io::AsyncWriteExt;

use crate::{Entry, EntryKind, Result, Snapshot, Vault, VaultError, VaultPath};

/// Vault backed by a directory on disk.
///
/// Dot-prefixed entries (`.obsidian`, `.trash`, `.git`) are not part of the
/// tree. Snapshots walk the directory in file-name order.
#[derive(Debug, Clone)]
pub struct FsVault {
	root: PathBuf,
}

impl FsVault {
	pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
		let root = root.into();
		if !root.is_dir() {
			return Err(VaultError::MissingRoot(root));
		}
		tracing::debug!(root = %root.display(), "vault.fs.open");
		Ok(Self { root })
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	fn absolute(&self, path: &VaultPath) -> Result<PathBuf> {
		if path.escapes() {
			return Err(VaultError::OutsideVault(path.clone()));
		}
		Ok(path.segments().fold(self.root.clone(), |acc, segment| acc.join(segment)))
	}

	fn relative(&self, abs: &Path) -> Option<VaultPath> {
		let relative = abs.strip_prefix(&self.root).ok()?;
		let path = VaultPath::new(&relative.to_string_lossy());
		(!path.is_root()).then_some(path)
	}

	fn kind_at(abs: &Path) -> Option<EntryKind> {
		kind_of(&std::fs::metadata(abs).ok()?)
	}

	/// [`Self::kind_at`] for async callers.
	async fn kind_at_async(abs: &Path) -> Option<EntryKind> {
		kind_of(&tokio::fs::metadata(abs).await.ok()?)
	}

	async fn resolve_async(&self, path: &VaultPath) -> Option<EntryKind> {
		let abs = self.absolute(path).ok()?;
		Self::kind_at_async(&abs).await
	}
}

fn kind_of(meta: &std::fs::Metadata) -> Option<EntryKind> {
	if meta.is_dir() {
		Some(EntryKind::Folder)
	} else if meta.is_file() {
		Some(EntryKind::File)
	} else {
		None
	}
}

fn io_error(path: &VaultPath, error: std::io::Error) -> VaultError {
	match error.kind() {
		ErrorKind::NotFound => VaultError::NotFound(path.clone()),
		ErrorKind::AlreadyExists => VaultError::AlreadyExists(path.clone()),
		_ => VaultError::Io {
			path: path.clone(),
			error,
		},
	}
}

#[async_trait]
impl Vault for FsVault {
	fn resolve(&self, path: &VaultPath) -> Option<EntryKind> {
		let abs = self.absolute(path).ok()?;
		Self::kind_at(&abs)
	}

	fn snapshot(&self) -> Snapshot {
		let walk = WalkBuilder::new(&self.root)
			.hidden(true)
			.ignore(false)
			.parents(false)
			.git_ignore(false)
			.git_global(false)
			.git_exclude(false)
			.sort_by_file_name(|a, b| a.cmp(b))
			.build();

		let mut entries = Vec::new();
		for result in walk {
			let entry = match result {
				Ok(entry) => entry,
				Err(error) => {
					tracing::warn!(root = %self.root.display(), %error, "vault.fs.walk_error");
					continue;
				}
			};
			if entry.depth() == 0 {
				continue;
			}
			let Some(file_type) = entry.file_type() else {
				continue;
			};
			let kind = if file_type.is_dir() {
				EntryKind::Folder
			} else if file_type.is_file() {
				EntryKind::File
			} else {
				continue;
			};
			if let Some(path) = self.relative(entry.path()) {
				entries.push(Entry { path, kind });
			}
		}
		tracing::trace!(entries = entries.len(), "vault.fs.snapshot");
		Snapshot::new(entries)
	}

	async fn create_folder(&self, path: &VaultPath) -> Result<()> {
		let abs = self.absolute(path)?;
		if path.is_root() || tokio::fs::try_exists(&abs).await.unwrap_or(false) {
			return Err(VaultError::AlreadyExists(path.clone()));
		}
		tokio::fs::create_dir_all(&abs).await.map_err(|error| io_error(path, error))?;
		tracing::debug!(%path, "vault.fs.create_folder");
		Ok(())
	}

	async fn create_file(&self, path: &VaultPath, content: &str) -> Result<()> {
		let abs = self.absolute(path)?;
		if let Some(parent) = path.parent() {
			match self.resolve_async(&parent).await {
				Some(EntryKind::Folder) => {}
				Some(EntryKind::File) => return Err(VaultError::NotAFolder(parent)),
				None => return Err(VaultError::NotFound(parent)),
			}
		}

		let mut file = tokio::fs::OpenOptions::new()
			.write(true)
			.create_new(true)
			.open(&abs)
			.await
			.map_err(|error| io_error(path, error))?;
		file.write_all(content.as_bytes()).await.map_err(|error| io_error(path, error))?;
		file.flush().await.map_err(|error| io_error(path, error))?;
		tracing::debug!(%path, bytes = content.len(), "vault.fs.create_file");
		Ok(())
	}

	async fn read(&self, path: &VaultPath) -> Result<String> {
		let abs = self.absolute(path)?;
		if Self::kind_at_async(&abs).await == Some(EntryKind::Folder) {
			return Err(VaultError::NotAFile(path.clone()));
		}
		tokio::fs::read_to_string(&abs).await.map_err(|error| io_error(path, error))
	}

	async fn modify(&self, path: &VaultPath, content: &str) -> Result<()> {
		let abs = self.absolute(path)?;
		match Self::kind_at_async(&abs).await {
			Some(EntryKind::File) => {}
			Some(EntryKind::Folder) => return Err(VaultError::NotAFile(path.clone())),
			None => return Err(VaultError::NotFound(path.clone())),
		}
		tokio::fs::write(&abs, content).await.map_err(|error| io_error(path, error))
	}

	async fn rename(&self, from: &VaultPath, to: &VaultPath) -> Result<()> {
		let abs_from = self.absolute(from)?;
		let abs_to = self.absolute(to)?;
		if Self::kind_at_async(&abs_from).await.is_none() {
			return Err(VaultError::NotFound(from.clone()));
		}
		if to.is_root() || Self::kind_at_async(&abs_to).await.is_some() {
			return Err(VaultError::AlreadyExists(to.clone()));
		}
		if let Some(parent) = to.parent()
			&& self.resolve_async(&parent).await != Some(EntryKind::Folder)
		{
			return Err(VaultError::NotFound(parent));
		}
		tokio::fs::rename(&abs_from, &abs_to).await.map_err(|error| io_error(from, error))?;
		tracing::debug!(%from, %to, "vault.fs.rename");
		Ok(())
	}
}
