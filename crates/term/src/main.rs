mod cli;
mod picker;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use cli::{Cli, Command, PickTarget, ScopeArg, VAULT_ENV, join_name, vault_root};
use vae_config::Settings;
use vae_scaffold::{NoteKind, Notices, Scaffolder};
use vae_suggest::{ChildFolderScope, FileScope, FolderScope, SuggestionSource, VaultSource};
use vae_vault::{FsVault, Vault, VaultPath};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose, cli.command.is_interactive());

	let cwd = std::env::current_dir().context("reading current directory")?;
	let root = vault_root(cli.vault, std::env::var_os(VAULT_ENV).map(PathBuf::from), cwd);
	let vault: Arc<dyn Vault> = Arc::new(FsVault::open(&root).with_context(|| format!("opening vault {}", root.display()))?);

	let loaded = vae_config::discover(&root, cli.config.as_deref())?;
	match &loaded.origin {
		Some(origin) => tracing::debug!(path = %origin.display(), "vae.config.loaded"),
		None => tracing::debug!("vae.config.defaults"),
	}
	let settings = loaded.settings;
	tracing::info!(vault = %root.display(), command = ?cli.command, "vae.start");

	match cli.command {
		Command::Suggest { scope, query, ext } => {
			for candidate in source_for(&vault, &settings, scope, ext).suggest(query.trim()) {
				match candidate.detail() {
					Some(_) => println!("{}\t{}", candidate.path, candidate.display),
					None => println!("{}", candidate.path),
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Command::Pick { target, ext } => {
			let scope = match target {
				PickTarget::Folder => ScopeArg::Folders,
				PickTarget::File => ScopeArg::Files,
				PickTarget::Project => ScopeArg::Projects,
			};
			let label = match target {
				PickTarget::Folder => "Folder",
				PickTarget::File => "File",
				PickTarget::Project => "Project",
			};
			match picker::run(label, source_for(&vault, &settings, scope, ext))? {
				Some(value) => {
					println!("{value}");
					Ok(ExitCode::SUCCESS)
				}
				None => Ok(ExitCode::FAILURE),
			}
		}
		command => {
			let notices = Notices::new();
			let scaffold = Scaffolder::new(vault.clone(), settings.clone()).with_notices(notices.clone());
			let code = run_scaffold(&scaffold, &vault, &settings, command).await?;
			for notice in notices.drain() {
				eprintln!("{notice}");
			}
			Ok(code)
		}
	}
}

/// Runs a scaffolding command. Scaffold failures are already reported as
/// notices and only turn into a failing exit code.
async fn run_scaffold(scaffold: &Scaffolder, vault: &Arc<dyn Vault>, settings: &Settings, command: Command) -> anyhow::Result<ExitCode> {
	let created = match command {
		Command::Person { name } => scaffold.create_person(&join_name(&name)).await.map(|note| note.path),
		Command::Project { name } => scaffold.create_project(&join_name(&name)).await.map(|project| project.note.path),
		Command::Projects => {
			for project in scaffold.project_folders() {
				println!("{project}");
			}
			return Ok(ExitCode::SUCCESS);
		}
		Command::Task { project, name } => {
			let project = match project {
				Some(project) => project,
				None => match picker::run("Project", source_for(vault, settings, ScopeArg::Projects, None))? {
					Some(picked) => VaultPath::new(&picked).name().to_string(),
					None => {
						tracing::info!("vae.task.no_project");
						eprintln!("No project selected");
						return Ok(ExitCode::FAILURE);
					}
				},
			};
			scaffold.create_task(&project, &join_name(&name)).await.map(|note| note.path)
		}
		Command::Todo { name } => scaffold.create_todo(&join_name(&name)).await.map(|note| note.path),
		Command::Thought { name } => scaffold.create_thought(&join_name(&name)).await.map(|note| note.path),
		Command::Process { path, kind } => scaffold.process_note(&VaultPath::new(&path), NoteKind::from(kind), Local::now()).await,
		Command::Suggest { .. } | Command::Pick { .. } => unreachable!("handled before scaffolding"),
	};

	match created {
		Ok(path) => {
			println!("{path}");
			Ok(ExitCode::SUCCESS)
		}
		Err(error) => {
			tracing::debug!(%error, "vae.command.failed");
			Ok(ExitCode::FAILURE)
		}
	}
}

fn source_for(vault: &Arc<dyn Vault>, settings: &Settings, scope: ScopeArg, ext: Option<String>) -> Box<dyn SuggestionSource> {
	let vault = Arc::clone(vault);
	match scope {
		ScopeArg::Folders => Box::new(VaultSource::new(vault, FolderScope)),
		ScopeArg::Files => {
			let scope = ext.map_or_else(FileScope::any, |ext| FileScope::with_extension(ext));
			Box::new(VaultSource::new(vault, scope))
		}
		ScopeArg::Projects => Box::new(VaultSource::new(vault, ChildFolderScope::new(VaultPath::new(&settings.project_folder)))),
	}
}

/// Logs to `$VAE_LOG_DIR/vae.<pid>.log` when set, otherwise to stderr.
/// Interactive commands without a log dir stay silent so output does not
/// tear the picker.
fn setup_tracing(verbose: bool, interactive: bool) {
	use std::fs::OpenOptions;

	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::fmt::format::FmtSpan;
	use tracing_subscriber::prelude::*;

	let default_filter = || {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| {
			if verbose {
				EnvFilter::new("vae=debug")
			} else {
				EnvFilter::new("vae=info")
			}
		})
	};

	if let Some(log_dir) = std::env::var("VAE_LOG_DIR").ok().map(PathBuf::from)
		&& std::fs::create_dir_all(&log_dir).is_ok()
	{
		let log_path = log_dir.join(format!("vae.{}.log", std::process::id()));
		if let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) {
			let file_layer = tracing_subscriber::fmt::layer()
				.with_writer(file)
				.with_ansi(false)
				.with_span_events(FmtSpan::CLOSE)
				.with_target(true);

			tracing_subscriber::registry().with(default_filter()).with(file_layer).init();
			tracing::info!(path = ?log_path, "vae.tracing.initialized");
			return;
		}
	}

	if interactive {
		return;
	}

	tracing_subscriber::fmt()
		.with_env_filter(default_filter())
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
