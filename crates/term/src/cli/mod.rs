//! CLI schema and parsing helpers for the vae binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use vae_config::NoteKind;

/// Environment variable naming the vault when `--vault` is absent.
pub const VAULT_ENV: &str = "VAE_VAULT";

#[derive(Parser, Debug)]
#[command(name = "vae")]
#[command(about = "Scaffold people, projects, tasks and thoughts in a markdown vault")]
#[command(version)]
pub struct Cli {
	/// Vault root. Defaults to $VAE_VAULT, then the current directory.
	#[arg(long, global = true, value_name = "DIR")]
	pub vault: Option<PathBuf>,

	/// Settings file, overriding discovery.
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Enable debug logging.
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Create a person folder with its note, `Interactions` and `Media`.
	Person {
		#[arg(required = true)]
		name: Vec<String>,
	},
	/// Create a project folder with its note, `Notes` and `Tasks`.
	Project {
		#[arg(required = true)]
		name: Vec<String>,
	},
	/// List existing projects.
	Projects,
	/// Create a task note inside a project.
	Task {
		/// Target project. Opens the project picker when omitted.
		#[arg(long, value_name = "NAME")]
		project: Option<String>,
		#[arg(required = true)]
		name: Vec<String>,
	},
	/// Create a standalone todo note.
	Todo {
		#[arg(required = true)]
		name: Vec<String>,
	},
	/// Create a thought note.
	Thought {
		#[arg(required = true)]
		name: Vec<String>,
	},
	/// Mark a note processed and move it into its year/month archive.
	Process {
		/// Vault-relative note path.
		path: String,
		#[arg(long, value_enum)]
		kind: KindArg,
	},
	/// Print suggestions for a query, one per line.
	Suggest {
		#[arg(value_enum)]
		scope: ScopeArg,
		query: String,
		/// Restrict file suggestions to this extension.
		#[arg(long, value_name = "EXT")]
		ext: Option<String>,
	},
	/// Pick a path interactively and print it.
	Pick {
		#[arg(value_enum)]
		target: PickTarget,
		/// Restrict file suggestions to this extension.
		#[arg(long, value_name = "EXT")]
		ext: Option<String>,
	},
}

impl Command {
	/// Commands that take over the terminal.
	pub fn is_interactive(&self) -> bool {
		matches!(self, Self::Pick { .. } | Self::Task { project: None, .. })
	}
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindArg {
	Person,
	Project,
	Task,
	Todo,
	Thought,
}

impl From<KindArg> for NoteKind {
	fn from(kind: KindArg) -> Self {
		match kind {
			KindArg::Person => NoteKind::Person,
			KindArg::Project => NoteKind::Project,
			KindArg::Task => NoteKind::Task,
			KindArg::Todo => NoteKind::Todo,
			KindArg::Thought => NoteKind::Thought,
		}
	}
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeArg {
	Folders,
	Files,
	Projects,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
	Folder,
	File,
	Project,
}

/// Joins the words of a note name given as separate arguments.
pub fn join_name(words: &[String]) -> String {
	words.join(" ")
}

/// Resolves the vault root: `--vault`, then `$VAE_VAULT`, then `cwd`.
pub fn vault_root(flag: Option<PathBuf>, from_env: Option<PathBuf>, cwd: PathBuf) -> PathBuf {
	flag.or(from_env.filter(|path| !path.as_os_str().is_empty())).unwrap_or(cwd)
}
