use std::fmt;
use std::str::FromStr;

/// The kinds of note Vae scaffolds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKind {
	Person,
	Project,
	Task,
	Todo,
	Thought,
}

impl NoteKind {
	pub const ALL: [NoteKind; 5] = [Self::Person, Self::Project, Self::Task, Self::Todo, Self::Thought];

	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Person => "person",
			Self::Project => "project",
			Self::Task => "task",
			Self::Todo => "todo",
			Self::Thought => "thought",
		}
	}
}

impl fmt::Display for NoteKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for NoteKind {
	type Err = String;

	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|kind| kind.as_str().eq_ignore_ascii_case(s))
			.ok_or_else(|| format!("unknown note kind: {s}"))
	}
}
