//! Transient user notifications.
//!
//! Scaffolding pushes a notice for every user-facing outcome; the host drains
//! and displays them. The queue is bounded and drops the oldest entries.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

/// Maximum number of notices retained before the oldest are dropped.
pub const MAX_NOTICES: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
	Info,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
	pub level: NoticeLevel,
	pub message: String,
}

impl fmt::Display for Notice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.message)
	}
}

/// Shared, cloneable notice queue.
#[derive(Debug, Clone, Default)]
pub struct Notices {
	entries: Arc<Mutex<VecDeque<Notice>>>,
}

impl Notices {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn info(&self, message: impl Into<String>) {
		self.push(NoticeLevel::Info, message.into());
	}

	pub fn error(&self, message: impl Into<String>) {
		self.push(NoticeLevel::Error, message.into());
	}

	fn push(&self, level: NoticeLevel, message: String) {
		let mut entries = self.entries.lock();
		if entries.len() >= MAX_NOTICES {
			entries.pop_front();
		}
		entries.push_back(Notice { level, message });
	}

	/// Takes every pending notice, oldest first.
	pub fn drain(&self) -> Vec<Notice> {
		self.entries.lock().drain(..).collect()
	}

	pub fn len(&self) -> usize {
		self.entries.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.lock().is_empty()
	}
}
