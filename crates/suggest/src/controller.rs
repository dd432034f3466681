//! Inline suggestion controller.
//!
//! [`InlineSuggest`] binds one [`InputField`] to one [`SuggestionSource`] and
//! a commit callback. The host forwards field events (`on_input`, `on_key`,
//! `on_focus`, `on_blur`), pointer events on panel rows, a clock (`tick`) and
//! paint opportunities (`on_frame`). Scroll and resize arrive through the
//! [`Viewport`] subscriptions taken in [`InlineSuggest::attach`] and are
//! released by [`InlineSuggest::destroy`] or on drop.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::Candidate;
use crate::field::InputField;
use crate::geometry::{PANEL_GAP, place_panel};
use crate::panel::Panel;
use crate::source::SuggestionSource;
use crate::viewport::{Subscription, Viewport, ViewportEventKind};

/// Delay between losing focus and hiding the panel, long enough for a click
/// on a row to land first.
pub const BLUR_GRACE: Duration = Duration::from_millis(150);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuggestPhase {
	#[default]
	Idle,
	Showing,
	Committed,
	Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestKey {
	ArrowDown,
	ArrowUp,
	Enter,
	Escape,
}

/// Per-binding selection state.
///
/// `highlighted` is either a valid index into `candidates` or `None`, and
/// `panel_visible` implies a non-empty candidate list.
#[derive(Debug, Clone, Default)]
pub struct SuggestSession {
	candidates: Vec<Candidate>,
	highlighted: Option<usize>,
	panel_visible: bool,
}

impl SuggestSession {
	pub fn candidates(&self) -> &[Candidate] {
		&self.candidates
	}

	pub fn highlighted(&self) -> Option<usize> {
		self.highlighted
	}

	pub fn highlighted_candidate(&self) -> Option<&Candidate> {
		self.highlighted.and_then(|idx| self.candidates.get(idx))
	}

	pub fn is_panel_visible(&self) -> bool {
		self.panel_visible
	}
}

type CommitFn = Box<dyn FnMut(&str)>;

pub struct InlineSuggest<F, S> {
	field: F,
	source: S,
	on_commit: CommitFn,
	session: SuggestSession,
	phase: SuggestPhase,
	/// `None` once destroyed.
	panel: Option<Panel>,
	gap: i32,
	layout_pending: bool,
	reflow: Arc<AtomicBool>,
	hide_deadline: Option<Instant>,
	subscriptions: Vec<Subscription>,
}

impl<F: InputField, S: SuggestionSource> InlineSuggest<F, S> {
	/// Creates a binding and registers its scroll and resize listeners on
	/// `viewport`.
	pub fn attach(field: F, source: S, viewport: &Viewport, on_commit: impl FnMut(&str) + 'static) -> Self {
		let reflow = Arc::new(AtomicBool::new(false));
		let subscriptions = [ViewportEventKind::Scroll, ViewportEventKind::Resize]
			.into_iter()
			.map(|kind| {
				let reflow = Arc::clone(&reflow);
				viewport.subscribe(kind, move |_| reflow.store(true, Ordering::Release))
			})
			.collect();
		tracing::trace!("suggest.attach");

		Self {
			field,
			source,
			on_commit: Box::new(on_commit),
			session: SuggestSession::default(),
			phase: SuggestPhase::Idle,
			panel: Some(Panel::new()),
			gap: PANEL_GAP,
			layout_pending: false,
			reflow,
			hide_deadline: None,
			subscriptions,
		}
	}

	/// Overrides the distance between field and panel.
	pub fn with_gap(mut self, gap: i32) -> Self {
		self.gap = gap;
		self
	}

	/// The field's text changed.
	pub fn on_input(&mut self) {
		if self.is_destroyed() {
			return;
		}
		let query = self.field.value().trim();
		if query.is_empty() {
			self.session.candidates.clear();
			self.hide();
			self.phase = SuggestPhase::Idle;
			return;
		}

		self.session.candidates = self.source.suggest(query);
		self.session.highlighted = None;
		if let Some(panel) = self.panel.as_mut() {
			panel.render(&self.session.candidates);
		}
		if self.session.candidates.is_empty() {
			self.hide();
			self.phase = SuggestPhase::Idle;
		} else {
			self.show();
			self.phase = SuggestPhase::Showing;
		}
	}

	/// Handles a navigation key. Returns whether the key was consumed; keys are
	/// only consumed while the panel is shown.
	pub fn on_key(&mut self, key: SuggestKey) -> bool {
		if self.is_destroyed() || !self.session.panel_visible {
			return false;
		}
		let last = self.session.candidates.len().saturating_sub(1);
		match key {
			SuggestKey::ArrowDown => {
				let next = self.session.highlighted.map_or(0, |idx| (idx + 1).min(last));
				self.highlight(Some(next));
			}
			SuggestKey::ArrowUp => {
				let prev = self.session.highlighted.and_then(|idx| idx.checked_sub(1));
				self.highlight(prev);
			}
			SuggestKey::Enter => {
				if let Some(idx) = self.session.highlighted {
					self.commit(idx);
				}
			}
			SuggestKey::Escape => {
				self.hide();
				self.phase = SuggestPhase::Cancelled;
				tracing::trace!("suggest.cancel");
			}
		}
		true
	}

	pub fn on_pointer_hover(&mut self, index: usize) {
		if self.is_destroyed() || !self.session.panel_visible || index >= self.session.candidates.len() {
			return;
		}
		self.highlight(Some(index));
	}

	/// Commits the clicked row regardless of the highlight. Returns whether a
	/// commit happened.
	pub fn on_pointer_click(&mut self, index: usize) -> bool {
		if self.is_destroyed() || !self.session.panel_visible || index >= self.session.candidates.len() {
			return false;
		}
		self.commit(index);
		true
	}

	/// Re-shows the previous candidates without querying again.
	pub fn on_focus(&mut self) {
		if self.is_destroyed() {
			return;
		}
		self.hide_deadline = None;
		if !self.field.value().trim().is_empty() && !self.session.candidates.is_empty() && !self.session.panel_visible {
			self.show();
			self.phase = SuggestPhase::Showing;
		}
	}

	/// Schedules the panel to hide once [`BLUR_GRACE`] has elapsed.
	pub fn on_blur(&mut self, now: Instant) {
		if self.is_destroyed() {
			return;
		}
		self.hide_deadline = Some(now + BLUR_GRACE);
	}

	/// Advances timers. Returns whether the panel was hidden.
	pub fn tick(&mut self, now: Instant) -> bool {
		match self.hide_deadline {
			Some(deadline) if deadline <= now => {
				self.hide_deadline = None;
				let was_visible = self.session.panel_visible;
				self.hide();
				if self.phase == SuggestPhase::Showing {
					self.phase = SuggestPhase::Idle;
				}
				was_visible
			}
			_ => false,
		}
	}

	/// Whether a blur hide is still waiting on its grace period.
	pub fn hide_pending(&self) -> bool {
		self.hide_deadline.is_some()
	}

	/// Paint opportunity. `panel_height` is the height the host measured for
	/// the rendered rows.
	///
	/// A freshly shown panel is placed and then revealed. A visible panel is
	/// repositioned only when a scroll or resize arrived since the last frame.
	pub fn on_frame(&mut self, panel_height: i32) {
		let reflow = self.reflow.swap(false, Ordering::AcqRel);
		let anchor = self.field.bounds();
		let gap = self.gap;
		let Some(panel) = self.panel.as_mut() else {
			return;
		};
		if !panel.is_displayed() {
			return;
		}
		if self.layout_pending {
			self.layout_pending = false;
			panel.place(place_panel(anchor, panel_height, gap));
			panel.reveal();
		} else if reflow {
			panel.place(place_panel(anchor, panel_height, gap));
			tracing::trace!(y = anchor.y, "suggest.reflow");
		}
	}

	fn show(&mut self) {
		if self.session.candidates.is_empty() {
			return;
		}
		let Some(panel) = self.panel.as_mut() else {
			return;
		};
		panel.show_pending();
		self.layout_pending = true;
		self.session.panel_visible = true;
	}

	fn highlight(&mut self, index: Option<usize>) {
		self.session.highlighted = index;
		if let Some(panel) = self.panel.as_mut() {
			panel.set_active(index);
		}
	}

	fn commit(&mut self, index: usize) {
		let Some(candidate) = self.session.candidates.get(index) else {
			return;
		};
		let path = candidate.path.clone();
		self.field.set_value(&path);
		(self.on_commit)(&path);
		self.hide();
		self.phase = SuggestPhase::Committed;
		tracing::debug!(path = %path, "suggest.commit");
	}
}

impl<F, S> InlineSuggest<F, S> {
	/// Detaches the viewport listeners and drops the panel. Safe to call more
	/// than once; every handler is a no-op afterwards.
	pub fn destroy(&mut self) {
		if self.panel.take().is_none() {
			return;
		}
		self.subscriptions.clear();
		self.session.panel_visible = false;
		self.session.highlighted = None;
		self.hide_deadline = None;
		self.layout_pending = false;
		tracing::trace!("suggest.destroy");
	}

	pub fn is_destroyed(&self) -> bool {
		self.panel.is_none()
	}

	pub fn session(&self) -> &SuggestSession {
		&self.session
	}

	pub fn phase(&self) -> SuggestPhase {
		self.phase
	}

	pub fn panel(&self) -> Option<&Panel> {
		self.panel.as_ref()
	}

	pub fn field(&self) -> &F {
		&self.field
	}

	/// Mutable access for host-side editing. Call [`Self::on_input`] after
	/// changing the text.
	pub fn field_mut(&mut self) -> &mut F {
		&mut self.field
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	fn hide(&mut self) {
		if let Some(panel) = self.panel.as_mut() {
			panel.hide();
			panel.set_active(None);
		}
		self.session.panel_visible = false;
		self.session.highlighted = None;
		self.layout_pending = false;
	}
}

impl<F, S> Drop for InlineSuggest<F, S> {
	fn drop(&mut self) {
		self.destroy();
	}
}

#[cfg(test)]
mod tests;
