//! Process-wide scroll and resize notifications.
//!
//! A [`Viewport`] stands in for the host window. Listeners register through
//! [`Viewport::subscribe`] and receive a [`Subscription`] that unregisters the
//! listener when dropped, so a binding cannot outlive its teardown with a
//! dangling global listener.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportEventKind {
	Scroll,
	Resize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportEvent {
	Scroll,
	Resize { width: i32, height: i32 },
}

impl ViewportEvent {
	pub fn kind(&self) -> ViewportEventKind {
		match self {
			Self::Scroll => ViewportEventKind::Scroll,
			Self::Resize { .. } => ViewportEventKind::Resize,
		}
	}
}

type Listener = Arc<dyn Fn(&ViewportEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
	next_id: u64,
	listeners: Vec<(u64, ViewportEventKind, Listener)>,
}

/// Shared handle to the host window's listener registry.
#[derive(Clone, Default)]
pub struct Viewport {
	registry: Arc<Mutex<Registry>>,
}

impl fmt::Debug for Viewport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Viewport")
			.field("listeners", &self.listener_count())
			.finish()
	}
}

impl Viewport {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `listener` for events of `kind`. Dropping the returned
	/// [`Subscription`] removes it.
	#[must_use = "dropping the subscription unregisters the listener"]
	pub fn subscribe(&self, kind: ViewportEventKind, listener: impl Fn(&ViewportEvent) + Send + Sync + 'static) -> Subscription {
		let mut registry = self.registry.lock();
		registry.next_id += 1;
		let id = registry.next_id;
		registry.listeners.push((id, kind, Arc::new(listener)));
		Subscription {
			id,
			registry: Arc::downgrade(&self.registry),
		}
	}

	/// Delivers `event` to every matching listener and returns how many ran.
	pub fn dispatch(&self, event: ViewportEvent) -> usize {
		let kind = event.kind();
		let listeners: Vec<Listener> = self
			.registry
			.lock()
			.listeners
			.iter()
			.filter(|(_, listener_kind, _)| *listener_kind == kind)
			.map(|(_, _, listener)| Arc::clone(listener))
			.collect();
		// Lock released: listeners may subscribe or unsubscribe.
		for listener in &listeners {
			listener(&event);
		}
		listeners.len()
	}

	pub fn listener_count(&self) -> usize {
		self.registry.lock().listeners.len()
	}
}

/// Registration guard returned by [`Viewport::subscribe`].
pub struct Subscription {
	id: u64,
	registry: Weak<Mutex<Registry>>,
}

impl Subscription {
	/// Unregisters now. Equivalent to dropping the guard.
	pub fn dispose(self) {}
}

impl fmt::Debug for Subscription {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Subscription").field("id", &self.id).finish()
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(registry) = self.registry.upgrade() {
			registry.lock().listeners.retain(|(id, _, _)| *id != self.id);
		}
	}
}
