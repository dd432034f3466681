//! Settings for Vae.
//!
//! Every note kind has a target folder and an optional template file, each
//! independently settable in TOML with kebab-case keys:
//!
//! ```toml
//! people-folder = "/My Knowledge/People"
//! person-template = ""          # empty: no template
//! project-folder = "/Work"
//! ```
//!
//! # Settings files
//!
//! [`discover`] looks in these locations, first match wins:
//!
//! 1. an explicit path (`--config`)
//! 2. `$VAE_CONFIG`
//! 3. `<vault>/.vae.toml`
//! 4. `$XDG_CONFIG_HOME/vae/config.toml` (or the platform config dir)
//! 5. built-in defaults
//!
//! Settings are read-only here; nothing writes them back.

pub mod error;
mod kind;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use error::{ConfigError, Result};
pub use kind::NoteKind;

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "VAE_CONFIG";

/// Per-vault settings file, relative to the vault root.
pub const VAULT_CONFIG_FILE: &str = ".vae.toml";

/// Folder and template locations, as vault paths.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Settings {
	pub people_folder: String,
	pub person_template: String,
	pub project_folder: String,
	pub project_template: String,
	pub thoughts_folder: String,
	pub thought_template: String,
	pub task_template: String,
	pub todo_template: String,
	pub todo_folder: String,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			people_folder: "/My Knowledge/People".into(),
			person_template: "/Vae/System/Templates/People Template.md".into(),
			project_folder: "/My Projects".into(),
			project_template: "/Vae/System/Templates/Tasks/Project Template.md".into(),
			thoughts_folder: "/My Consciousness/Thoughts".into(),
			thought_template: "/Vae/System/Templates/Thought Template.md".into(),
			task_template: "/Vae/System/Templates/Tasks/Task Template.md".into(),
			todo_template: "/Vae/System/Templates/To Do Template.md".into(),
			todo_folder: "/My Core/Tasks".into(),
		}
	}
}

impl Settings {
	/// Parses TOML; missing keys keep their defaults.
	pub fn from_toml_str(input: &str) -> Result<Self> {
		toml::from_str(input).map_err(|error| ConfigError::Parse {
			path: PathBuf::from("<inline>"),
			error,
		})
	}

	/// Loads settings from a file.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
			path: path.to_path_buf(),
			error: e,
		})?;
		toml::from_str(&content).map_err(|error| ConfigError::Parse {
			path: path.to_path_buf(),
			error,
		})
	}

	/// Template configured for `kind`, `None` when the setting is blank.
	pub fn template_for(&self, kind: NoteKind) -> Option<&str> {
		let template = match kind {
			NoteKind::Person => &self.person_template,
			NoteKind::Project => &self.project_template,
			NoteKind::Task => &self.task_template,
			NoteKind::Todo => &self.todo_template,
			NoteKind::Thought => &self.thought_template,
		};
		non_blank(template)
	}

	/// Base folder notes of `kind` live under. Tasks live inside a project,
	/// so they report the project folder.
	pub fn folder_for(&self, kind: NoteKind) -> &str {
		match kind {
			NoteKind::Person => &self.people_folder,
			NoteKind::Project | NoteKind::Task => &self.project_folder,
			NoteKind::Todo => &self.todo_folder,
			NoteKind::Thought => &self.thoughts_folder,
		}
	}
}

fn non_blank(value: &str) -> Option<&str> {
	let trimmed = value.trim();
	(!trimmed.is_empty()).then_some(trimmed)
}

/// Settings together with the file they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loaded {
	pub settings: Settings,
	/// `None` when the defaults were used.
	pub origin: Option<PathBuf>,
}

/// Finds and loads settings for the vault at `vault_root`.
///
/// An explicit path or `$VAE_CONFIG` must load successfully. The vault and
/// user files are only read when they exist.
pub fn discover(vault_root: &Path, explicit: Option<&Path>) -> Result<Loaded> {
	let from_env = std::env::var_os(CONFIG_ENV).filter(|value| !value.is_empty()).map(PathBuf::from);
	let user_dir = dirs::config_dir().map(|dir| dir.join("vae"));
	discover_in(vault_root, explicit, from_env.as_deref(), user_dir.as_deref())
}

fn discover_in(vault_root: &Path, explicit: Option<&Path>, from_env: Option<&Path>, user_dir: Option<&Path>) -> Result<Loaded> {
	if let Some(path) = explicit.or(from_env) {
		return load_from(path);
	}

	let vault_file = vault_root.join(VAULT_CONFIG_FILE);
	if vault_file.is_file() {
		return load_from(&vault_file);
	}

	if let Some(user_file) = user_dir.map(|dir| dir.join("config.toml"))
		&& user_file.is_file()
	{
		return load_from(&user_file);
	}

	tracing::debug!("config.defaults");
	Ok(Loaded {
		settings: Settings::default(),
		origin: None,
	})
}

fn load_from(path: &Path) -> Result<Loaded> {
	let settings = Settings::load(path)?;
	tracing::debug!(path = %path.display(), "config.loaded");
	Ok(Loaded {
		settings,
		origin: Some(path.to_path_buf()),
	})
}

#[cfg(test)]
mod tests;
