//! Error types for scaffolding operations.

use thiserror::Error;
use vae_vault::{VaultError, VaultPath};

use crate::frontmatter::FrontmatterError;

/// Errors surfaced to the user by a scaffolding call.
///
/// A missing or unreadable template is not an error: the note falls back to a
/// heading.
#[derive(Debug, Error)]
pub enum ScaffoldError {
	/// The name is empty once illegal characters are stripped.
	#[error("name is empty after removing illegal characters")]
	EmptyName,

	/// A path that must be a folder holds a file.
	#[error("path exists but is not a folder: {0}")]
	NotAFolder(VaultPath),

	/// The vault rejected a create or move.
	#[error("failed to create {path}: {error}")]
	CreationFailed {
		/// Target of the rejected call.
		path: VaultPath,
		/// The backend's reason.
		error: VaultError,
	},

	/// A note's frontmatter could not be read or written.
	#[error("invalid frontmatter in {path}: {error}")]
	Frontmatter {
		/// The note being processed.
		path: VaultPath,
		/// What went wrong.
		error: FrontmatterError,
	},

	/// Any other vault failure (missing note, read error).
	#[error(transparent)]
	Vault(#[from] VaultError),
}

/// Result type for scaffolding operations.
pub type Result<T> = std::result::Result<T, ScaffoldError>;
