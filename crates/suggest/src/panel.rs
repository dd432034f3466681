//! Floating suggestion panel model.
//!
//! The panel is host-agnostic: it records what should be drawn and where, and
//! the host paints it. `displayed` means the panel takes part in layout;
//! `visible` means it may be painted. A freshly shown panel is displayed but
//! not visible until it has been placed, so it never flashes at a stale
//! position.

use crate::Candidate;
use crate::geometry::{PanelSide, Placement, Rect};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
	pub title: String,
	pub detail: Option<String>,
	pub active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Panel {
	rows: Vec<PanelRow>,
	displayed: bool,
	visible: bool,
	placement: Option<Placement>,
}

impl Panel {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replaces the rows with one per candidate, none active.
	pub fn render(&mut self, candidates: &[Candidate]) {
		self.rows = candidates
			.iter()
			.map(|candidate| PanelRow {
				title: candidate.display.clone(),
				detail: candidate.detail().map(str::to_owned),
				active: false,
			})
			.collect();
	}

	pub fn set_active(&mut self, index: Option<usize>) {
		for (idx, row) in self.rows.iter_mut().enumerate() {
			row.active = Some(idx) == index;
		}
	}

	pub fn show_pending(&mut self) {
		self.displayed = true;
		self.visible = false;
	}

	pub fn hide(&mut self) {
		self.displayed = false;
		self.visible = false;
	}

	pub fn place(&mut self, placement: Placement) {
		self.placement = Some(placement);
	}

	pub fn reveal(&mut self) {
		self.visible = self.displayed;
	}

	pub fn rows(&self) -> &[PanelRow] {
		&self.rows
	}

	pub fn is_displayed(&self) -> bool {
		self.displayed
	}

	pub fn is_visible(&self) -> bool {
		self.visible
	}

	pub fn placement(&self) -> Option<Placement> {
		self.placement
	}

	pub fn rect(&self) -> Option<Rect> {
		self.placement.map(|placement| placement.rect)
	}

	pub fn side(&self) -> Option<PanelSide> {
		self.placement.map(|placement| placement.side)
	}
}

#[cfg(test)]
mod tests {
	use super::Panel;
	use crate::Candidate;
	use crate::geometry::{PanelSide, Placement, Rect};

	#[test]
	fn render_keeps_detail_only_when_it_differs() {
		let mut panel = Panel::new();
		panel.render(&[Candidate::folder("Projects/Alpha", "Alpha"), Candidate::folder("Beta", "Beta")]);
		assert_eq!(panel.rows()[0].detail.as_deref(), Some("Projects/Alpha"));
		assert_eq!(panel.rows()[1].detail, None);
	}

	#[test]
	fn set_active_marks_a_single_row() {
		let mut panel = Panel::new();
		panel.render(&[Candidate::folder("a", "a"), Candidate::folder("b", "b")]);
		panel.set_active(Some(1));
		assert_eq!(panel.rows().iter().filter(|row| row.active).count(), 1);
		assert!(panel.rows()[1].active);
		panel.set_active(None);
		assert!(panel.rows().iter().all(|row| !row.active));
	}

	#[test]
	fn reveal_requires_display() {
		let mut panel = Panel::new();
		panel.reveal();
		assert!(!panel.is_visible());

		panel.show_pending();
		assert!(panel.is_displayed() && !panel.is_visible());
		panel.place(Placement {
			rect: Rect::new(0, 0, 10, 3),
			side: PanelSide::Below,
		});
		panel.reveal();
		assert!(panel.is_visible());
		assert_eq!(panel.side(), Some(PanelSide::Below));

		panel.hide();
		assert!(!panel.is_displayed() && !panel.is_visible());
	}
}
