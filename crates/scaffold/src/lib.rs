//! Note scaffolding.
//!
//! [`Scaffolder`] creates the folder skeleton and note for each [`NoteKind`]:
//!
//! | kind | folder | subfolders |
//! |---|---|---|
//! | person | `<people-folder>/<name>` (unique) | `Interactions`, `Media` |
//! | project | `<project-folder>/<name>` (unique) | `Notes`, `Tasks` |
//! | task | `<project-folder>/<project>/Tasks` | |
//! | todo | `<todo-folder>` | |
//! | thought | `<thoughts-folder>` | |
//!
//! Each call sanitizes the name, ensures folders exist, picks a unique note
//! path and fills it from the configured template (or a `# name` heading).
//! Calls run their steps sequentially and abort on the first failure without
//! rolling back folders already made. Every outcome is also pushed to
//! [`Notices`].

mod error;
pub mod frontmatter;
mod name;
pub mod notice;
pub mod paths;
mod process;
pub mod template;

use std::sync::Arc;

use chrono::{DateTime, Local};
use vae_config::Settings;
use vae_vault::{EntryKind, Vault, VaultError, VaultPath};

pub use error::{Result, ScaffoldError};
pub use name::sanitize_name;
pub use notice::{Notice, NoticeLevel, Notices};
pub use paths::{unique_file_path, unique_folder_path};
pub use process::{archive_folder, status_key, strip_action_block};
pub use template::{NoTemplateEngine, RenderRequest, TemplateEngine, TemplateVars, substitute};
pub use vae_config::NoteKind;

const PERSON_SUBFOLDERS: [&str; 2] = ["Interactions", "Media"];
const PROJECT_SUBFOLDERS: [&str; 2] = ["Notes", "Tasks"];
const TASKS_FOLDER: &str = "Tasks";

/// Source of the creation instant used by template placeholders.
pub type Clock = fn() -> DateTime<Local>;

/// A note created or located by the scaffolder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteHandle {
	pub path: VaultPath,
}

impl NoteHandle {
	pub fn new(path: VaultPath) -> Self {
		Self { path }
	}
}

/// Result of [`Scaffolder::create_project`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectHandle {
	pub note: NoteHandle,
	pub folder: VaultPath,
}

pub struct Scaffolder {
	vault: Arc<dyn Vault>,
	settings: Settings,
	engine: Arc<dyn TemplateEngine>,
	notices: Notices,
	clock: Clock,
}

impl Scaffolder {
	pub fn new(vault: Arc<dyn Vault>, settings: Settings) -> Self {
		Self {
			vault,
			settings,
			engine: Arc::new(NoTemplateEngine),
			notices: Notices::new(),
			clock: Local::now,
		}
	}

	pub fn with_engine(mut self, engine: Arc<dyn TemplateEngine>) -> Self {
		self.engine = engine;
		self
	}

	pub fn with_notices(mut self, notices: Notices) -> Self {
		self.notices = notices;
		self
	}

	pub fn with_clock(mut self, clock: Clock) -> Self {
		self.clock = clock;
		self
	}

	pub fn vault(&self) -> &Arc<dyn Vault> {
		&self.vault
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn notices(&self) -> &Notices {
		&self.notices
	}

	/// Creates `<people-folder>/<name>/<name>.md` with `Interactions` and
	/// `Media` next to it.
	pub async fn create_person(&self, name: &str) -> Result<NoteHandle> {
		let result = self.person(name).await;
		self.report(NoteKind::Person, result)
	}

	/// Creates `<project-folder>/<name>/<name>.md` with `Notes` and `Tasks`
	/// next to it.
	pub async fn create_project(&self, name: &str) -> Result<ProjectHandle> {
		let result = self.project(name).await;
		self.report(NoteKind::Project, result)
	}

	/// Names of the folders directly inside the project folder, in tree
	/// order. Empty when the project folder is missing.
	pub fn project_folders(&self) -> Vec<String> {
		let base = VaultPath::new(&self.settings.project_folder);
		let tree = self.vault.snapshot();
		if tree.kind_of(&base) != Some(EntryKind::Folder) {
			return Vec::new();
		}
		tree.children(&base)
			.filter(|entry| entry.is_folder())
			.map(|entry| entry.name().to_string())
			.collect()
	}

	/// Creates a task note in `<project-folder>/<project>/Tasks`.
	pub async fn create_task(&self, project: &str, name: &str) -> Result<NoteHandle> {
		let result = self.task(project, name).await;
		self.report(NoteKind::Task, result)
	}

	/// Creates a standalone todo note in the todo folder.
	pub async fn create_todo(&self, name: &str) -> Result<NoteHandle> {
		let result = self.create_flat(NoteKind::Todo, &self.settings.todo_folder, name).await;
		self.report(NoteKind::Todo, result)
	}

	/// Creates a thought note in the thoughts folder.
	pub async fn create_thought(&self, name: &str) -> Result<NoteHandle> {
		let result = self.create_flat(NoteKind::Thought, &self.settings.thoughts_folder, name).await;
		self.report(NoteKind::Thought, result)
	}

	async fn person(&self, name: &str) -> Result<NoteHandle> {
		let clean = sanitize_name(name)?;
		let folder = self.new_entity_folder(&self.settings.people_folder, &clean, &PERSON_SUBFOLDERS).await?;
		self.write_note(NoteKind::Person, &folder, &clean).await
	}

	async fn project(&self, name: &str) -> Result<ProjectHandle> {
		let clean = sanitize_name(name)?;
		let folder = self.new_entity_folder(&self.settings.project_folder, &clean, &PROJECT_SUBFOLDERS).await?;
		let note = self.write_note(NoteKind::Project, &folder, &clean).await?;
		Ok(ProjectHandle { note, folder })
	}

	async fn task(&self, project: &str, name: &str) -> Result<NoteHandle> {
		let clean = sanitize_name(name)?;
		let project = sanitize_name(project)?;
		let tasks = VaultPath::new(&self.settings.project_folder).join(&project).join(TASKS_FOLDER);
		self.ensure_folder(&tasks).await?;
		self.write_note(NoteKind::Task, &tasks, &clean).await
	}

	async fn create_flat(&self, kind: NoteKind, folder: &str, name: &str) -> Result<NoteHandle> {
		let clean = sanitize_name(name)?;
		let folder = VaultPath::new(folder);
		self.ensure_folder(&folder).await?;
		self.write_note(kind, &folder, &clean).await
	}

	/// Ensures `base`, then creates a fresh `<base>/<name>` (suffixed when
	/// taken) together with its subfolders.
	async fn new_entity_folder(&self, base: &str, name: &str, subfolders: &[&str]) -> Result<VaultPath> {
		let base = VaultPath::new(base);
		self.ensure_folder(&base).await?;
		let folder = unique_folder_path(self.vault.as_ref(), base.join(name));
		self.ensure_folder(&folder).await?;
		for sub in subfolders {
			self.ensure_folder(&folder.join(sub)).await?;
		}
		Ok(folder)
	}

	/// Creates `path` unless it already is a folder.
	async fn ensure_folder(&self, path: &VaultPath) -> Result<()> {
		match self.vault.resolve(path) {
			Some(EntryKind::Folder) => Ok(()),
			Some(EntryKind::File) => Err(ScaffoldError::NotAFolder(path.clone())),
			None => match self.vault.create_folder(path).await {
				Ok(()) => {
					tracing::debug!(path = %path, "scaffold.folder.created");
					Ok(())
				}
				Err(VaultError::AlreadyExists(_)) if self.vault.resolve(path) == Some(EntryKind::Folder) => Ok(()),
				Err(error) => Err(ScaffoldError::CreationFailed {
					path: path.clone(),
					error,
				}),
			},
		}
	}

	/// Writes `<folder>/<name>.md` (suffixed when taken) from the template
	/// configured for `kind`.
	async fn write_note(&self, kind: NoteKind, folder: &VaultPath, name: &str) -> Result<NoteHandle> {
		let path = unique_file_path(self.vault.as_ref(), folder.join(&format!("{name}.md")));
		let vars = TemplateVars::new(name, (self.clock)());
		let template = self.settings.template_for(kind).map(VaultPath::new);

		if let Some(template) = &template
			&& self.engine.is_available()
		{
			let request = RenderRequest {
				template: template.clone(),
				folder: folder.clone(),
				file_name: path.stem().to_string(),
				variables: vars.pairs(),
			};
			if let Some(note) = self.engine.try_render(&request).await {
				tracing::debug!(%kind, path = %note.path, "scaffold.template.engine");
				return Ok(note);
			}
			tracing::debug!(%kind, template = %template, "scaffold.template.engine_declined");
		}

		let text = match &template {
			Some(template) => self.load_template(template).await,
			None => None,
		};
		let content = match text {
			Some(text) => substitute(&text, &vars),
			None => format!("# {name}\n"),
		};

		self.vault
			.create_file(&path, &content)
			.await
			.map_err(|error| ScaffoldError::CreationFailed {
				path: path.clone(),
				error,
			})?;
		Ok(NoteHandle::new(path))
	}

	/// Template text, or `None` when the path does not hold a readable file.
	async fn load_template(&self, template: &VaultPath) -> Option<String> {
		if self.vault.resolve(template) != Some(EntryKind::File) {
			tracing::debug!(template = %template, "scaffold.template.unavailable");
			return None;
		}
		match self.vault.read(template).await {
			Ok(text) => Some(text),
			Err(error) => {
				tracing::warn!(template = %template, %error, "scaffold.template.read_failed");
				None
			}
		}
	}

	fn report<T: Created>(&self, kind: NoteKind, result: Result<T>) -> Result<T> {
		match &result {
			Ok(created) => {
				tracing::info!(%kind, path = %created.note_path(), "scaffold.created");
				self.notices.info(format!("Created {kind} {}", created.note_path()));
			}
			Err(error) => {
				tracing::warn!(%kind, %error, "scaffold.failed");
				self.notices.error(format!("Failed to create {kind}: {error}"));
			}
		}
		result
	}
}

trait Created {
	fn note_path(&self) -> &VaultPath;
}

impl Created for NoteHandle {
	fn note_path(&self) -> &VaultPath {
		&self.path
	}
}

impl Created for ProjectHandle {
	fn note_path(&self) -> &VaultPath {
		&self.note.path
	}
}
