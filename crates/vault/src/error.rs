//! Error types for vault operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::VaultPath;

/// Errors reported by a [`Vault`](crate::Vault) backend.
#[derive(Debug, Error)]
pub enum VaultError {
	/// Nothing exists at the path.
	#[error("not found: {0}")]
	NotFound(VaultPath),

	/// A create or rename target is already taken.
	#[error("already exists: {0}")]
	AlreadyExists(VaultPath),

	/// A folder was required but the path holds a file.
	#[error("not a folder: {0}")]
	NotAFolder(VaultPath),

	/// A file was required but the path holds a folder.
	#[error("not a file: {0}")]
	NotAFile(VaultPath),

	/// The path walks above the vault root.
	#[error("path escapes the vault: {0}")]
	OutsideVault(VaultPath),

	/// The directory backing an on-disk vault does not exist.
	#[error("vault root is not a directory: {}", .0.display())]
	MissingRoot(PathBuf),

	/// Underlying filesystem failure.
	#[error("I/O error at {path}: {error}")]
	Io {
		/// Vault path the operation targeted.
		path: VaultPath,
		/// The underlying I/O error.
		error: std::io::Error,
	},
}

/// Result type for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
