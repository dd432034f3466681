//! Note processing: mark a note done and file it under a date bucket.

use chrono::{DateTime, Datelike, Local, SecondsFormat, Utc};
use vae_vault::{EntryKind, VaultError, VaultPath};

use crate::frontmatter::Document;
use crate::paths::unique_file_path;
use crate::{NoteKind, Result, ScaffoldError, Scaffolder};

const ACTION_BLOCK_OPEN: &str = "```meta-bind-button";
const FENCE: &str = "```";

/// Frontmatter key recording a note's processing status.
pub fn status_key(kind: NoteKind) -> &'static str {
	match kind {
		NoteKind::Person => "person-status",
		NoteKind::Project => "project-status",
		NoteKind::Task | NoteKind::Todo => "task-status",
		NoteKind::Thought => "note-status",
	}
}

/// Removes the first fenced `meta-bind-button` block, fences included.
/// Text without a complete block is returned unchanged.
pub fn strip_action_block(text: &str) -> String {
	let Some(start) = text.find(ACTION_BLOCK_OPEN) else {
		return text.to_string();
	};
	let after_open = start + ACTION_BLOCK_OPEN.len();
	let Some(close) = text[after_open..].find(FENCE) else {
		return text.to_string();
	};
	let end = after_open + close + FENCE.len();
	format!("{}{}", &text[..start], &text[end..])
}

/// `<parent>/<YYYY>/<MM>` for a note at `note`.
pub fn archive_folder(note: &VaultPath, now: DateTime<Local>) -> VaultPath {
	note.parent()
		.unwrap_or_else(VaultPath::root)
		.join(&format!("{:04}", now.year()))
		.join(&format!("{:02}", now.month()))
}

impl Scaffolder {
	/// Marks the note at `path` as processed and moves it to
	/// `<parent>/<YYYY>/<MM>/<stem>.md`. Returns the new location.
	///
	/// Frontmatter gains `<kind>-status: processed` and a UTC `processed`
	/// timestamp; the first `meta-bind-button` block is removed from the body.
	pub async fn process_note(&self, path: &VaultPath, kind: NoteKind, now: DateTime<Local>) -> Result<VaultPath> {
		match self.process(path, kind, now).await {
			Ok(target) => {
				tracing::info!(%kind, from = %path, to = %target, "scaffold.process.archived");
				self.notices.info(format!("Processed {kind} note, moved to {target}"));
				Ok(target)
			}
			Err(error) => {
				tracing::warn!(%kind, path = %path, %error, "scaffold.process.failed");
				self.notices.error(format!("Failed to process {path}: {error}"));
				Err(error)
			}
		}
	}

	async fn process(&self, path: &VaultPath, kind: NoteKind, now: DateTime<Local>) -> Result<VaultPath> {
		match self.vault.resolve(path) {
			Some(EntryKind::File) => {}
			Some(EntryKind::Folder) => return Err(VaultError::NotAFile(path.clone()).into()),
			None => return Err(VaultError::NotFound(path.clone()).into()),
		}

		let content = self.vault.read(path).await?;
		let frontmatter_error = |error| ScaffoldError::Frontmatter {
			path: path.clone(),
			error,
		};
		let mut doc = Document::parse(&content).map_err(frontmatter_error)?;
		doc.set(status_key(kind), "processed");
		doc.set("processed", &now.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true));
		let body = strip_action_block(doc.body());
		*doc.body_mut() = body;
		let updated = doc.render().map_err(frontmatter_error)?;
		self.vault.modify(path, &updated).await?;

		let bucket = archive_folder(path, now);
		self.ensure_folder(&bucket).await?;
		let target = unique_file_path(self.vault.as_ref(), bucket.join(&format!("{}.md", path.stem())));
		self.vault
			.rename(path, &target)
			.await
			.map_err(|error| ScaffoldError::CreationFailed {
				path: target.clone(),
				error,
			})?;
		Ok(target)
	}
}
