use std::fs;

use tempfile::TempDir;

use super::*;

#[test]
fn defaults_match_documented_paths() {
	let settings = Settings::default();
	assert_eq!(settings.people_folder, "/My Knowledge/People");
	assert_eq!(settings.folder_for(NoteKind::Task), "/My Projects");
	assert_eq!(settings.folder_for(NoteKind::Todo), "/My Core/Tasks");
	assert_eq!(
		settings.template_for(NoteKind::Thought),
		Some("/Vae/System/Templates/Thought Template.md")
	);
}

#[test]
fn partial_file_keeps_other_defaults() {
	let settings = Settings::from_toml_str(
		r#"
		people-folder = "/People"
		task-template = ""
		"#,
	)
	.unwrap();
	assert_eq!(settings.people_folder, "/People");
	assert_eq!(settings.project_folder, Settings::default().project_folder);
	assert_eq!(settings.template_for(NoteKind::Task), None);
}

#[test]
fn blank_template_counts_as_unset() {
	let settings = Settings::from_toml_str("person-template = \"   \"").unwrap();
	assert_eq!(settings.template_for(NoteKind::Person), None);
}

#[test]
fn unknown_keys_are_rejected() {
	let err = Settings::from_toml_str("people-foldr = \"/People\"").unwrap_err();
	assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn load_reports_missing_file() {
	let dir = TempDir::new().unwrap();
	let err = Settings::load(dir.path().join("absent.toml")).unwrap_err();
	assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn discovery_prefers_explicit_then_env() {
	let dir = TempDir::new().unwrap();
	let explicit = dir.path().join("explicit.toml");
	let env = dir.path().join("env.toml");
	fs::write(&explicit, "todo-folder = \"/Explicit\"").unwrap();
	fs::write(&env, "todo-folder = \"/Env\"").unwrap();
	fs::write(dir.path().join(VAULT_CONFIG_FILE), "todo-folder = \"/Vault\"").unwrap();

	let loaded = discover_in(dir.path(), Some(&explicit), Some(&env), None).unwrap();
	assert_eq!(loaded.settings.todo_folder, "/Explicit");
	assert_eq!(loaded.origin.as_deref(), Some(explicit.as_path()));

	let loaded = discover_in(dir.path(), None, Some(&env), None).unwrap();
	assert_eq!(loaded.settings.todo_folder, "/Env");
}

#[test]
fn discovery_falls_back_to_vault_then_user_then_defaults() {
	let vault = TempDir::new().unwrap();
	let user = TempDir::new().unwrap();

	let loaded = discover_in(vault.path(), None, None, Some(user.path())).unwrap();
	assert_eq!(loaded.origin, None);
	assert_eq!(loaded.settings, Settings::default());

	fs::write(user.path().join("config.toml"), "todo-folder = \"/User\"").unwrap();
	let loaded = discover_in(vault.path(), None, None, Some(user.path())).unwrap();
	assert_eq!(loaded.settings.todo_folder, "/User");

	fs::write(vault.path().join(VAULT_CONFIG_FILE), "todo-folder = \"/Vault\"").unwrap();
	let loaded = discover_in(vault.path(), None, None, Some(user.path())).unwrap();
	assert_eq!(loaded.settings.todo_folder, "/Vault");
}

#[test]
fn explicit_path_must_exist() {
	let vault = TempDir::new().unwrap();
	let missing = vault.path().join("nope.toml");
	assert!(discover_in(vault.path(), Some(&missing), None, None).is_err());
}

#[test]
fn note_kind_parses_case_insensitively() {
	assert_eq!("Thought".parse::<NoteKind>(), Ok(NoteKind::Thought));
	assert!("memo".parse::<NoteKind>().is_err());
}
