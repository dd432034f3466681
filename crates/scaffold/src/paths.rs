//! Collision-free paths.
//!
//! Uniqueness is check-then-create: nothing reserves the returned path, so two
//! concurrent callers can pick the same one.

use vae_vault::{Vault, VaultPath};

/// `path` itself when free, otherwise the first free `<name>_2`, `<name>_3`, ...
pub fn unique_folder_path(vault: &dyn Vault, path: VaultPath) -> VaultPath {
	unique_with(vault, path, |path, n| sibling(path, &format!("{}_{n}", path.name())))
}

/// Like [`unique_folder_path`] but the suffix goes before the extension
/// (`Plan.md` -> `Plan_2.md`).
pub fn unique_file_path(vault: &dyn Vault, path: VaultPath) -> VaultPath {
	unique_with(vault, path, |path, n| {
		let name = match path.extension() {
			Some(ext) => format!("{}_{n}.{ext}", path.stem()),
			None => format!("{}_{n}", path.name()),
		};
		sibling(path, &name)
	})
}

fn unique_with(vault: &dyn Vault, path: VaultPath, candidate: impl Fn(&VaultPath, usize) -> VaultPath) -> VaultPath {
	if vault.resolve(&path).is_none() {
		return path;
	}
	let mut n = 2;
	loop {
		let next = candidate(&path, n);
		if vault.resolve(&next).is_none() {
			return next;
		}
		n += 1;
	}
}

fn sibling(path: &VaultPath, name: &str) -> VaultPath {
	path.parent().unwrap_or_else(VaultPath::root).join(name)
}
