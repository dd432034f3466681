//! Template placeholders and the optional richer template engine.
//!
//! Built-in substitution understands `{{name}}`, `{{title}}`, `{{date}}`,
//! `{{time}}` and `{{datetime}}`. Unknown placeholders are left as written.

use async_trait::async_trait;
use chrono::{DateTime, Local, SecondsFormat};
use vae_vault::VaultPath;

use crate::NoteHandle;

/// Values available to a note template.
#[derive(Debug, Clone)]
pub struct TemplateVars {
	name: String,
	now: DateTime<Local>,
}

impl TemplateVars {
	pub fn new(name: impl Into<String>, now: DateTime<Local>) -> Self {
		Self { name: name.into(), now }
	}

	pub fn resolve_var(&self, var: &str) -> Option<String> {
		match var {
			"name" | "title" => Some(self.name.clone()),
			"date" => Some(self.now.format("%Y-%m-%d").to_string()),
			"time" => Some(self.now.format("%H:%M:%S").to_string()),
			"datetime" => Some(self.now.to_rfc3339_opts(SecondsFormat::Millis, false)),
			_ => None,
		}
	}

	/// Name/value pairs handed to a [`TemplateEngine`].
	pub fn pairs(&self) -> Vec<(String, String)> {
		["name", "title", "date", "time", "datetime"]
			.into_iter()
			.filter_map(|var| self.resolve_var(var).map(|value| (var.to_string(), value)))
			.collect()
	}
}

/// Replaces every known `{{var}}` in `template` in a single left-to-right
/// pass; substituted text is never rescanned.
pub fn substitute(template: &str, vars: &TemplateVars) -> String {
	let mut out = String::with_capacity(template.len());
	let mut rest = template;
	while let Some(open) = rest.find("{{") {
		out.push_str(&rest[..open]);
		let after = &rest[open + 2..];
		match after.find("}}") {
			Some(close) => match vars.resolve_var(&after[..close]) {
				Some(value) => {
					out.push_str(&value);
					rest = &after[close + 2..];
				}
				None => {
					out.push_str("{{");
					rest = after;
				}
			},
			None => {
				out.push_str(&rest[open..]);
				rest = "";
			}
		}
	}
	out.push_str(rest);
	out
}

/// What a [`TemplateEngine`] is asked to produce.
#[derive(Debug, Clone)]
pub struct RenderRequest {
	pub template: VaultPath,
	pub folder: VaultPath,
	/// File name without extension.
	pub file_name: String,
	pub variables: Vec<(String, String)>,
}

/// An optional, richer templating engine living next to the vault.
///
/// When one is available it is preferred over built-in substitution; `None`
/// from [`try_render`](Self::try_render) falls back to it.
#[async_trait]
pub trait TemplateEngine: Send + Sync {
	fn is_available(&self) -> bool;

	async fn try_render(&self, request: &RenderRequest) -> Option<NoteHandle>;
}

/// The engine used when nothing richer is installed.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTemplateEngine;

#[async_trait]
impl TemplateEngine for NoTemplateEngine {
	fn is_available(&self) -> bool {
		false
	}

	async fn try_render(&self, _request: &RenderRequest) -> Option<NoteHandle> {
		None
	}
}
