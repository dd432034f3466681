//! Panel placement relative to the bound input field.

/// Distance between the input's edge and the panel.
pub const PANEL_GAP: i32 = 4;

/// Axis-aligned rectangle in viewport coordinates. `y` grows downwards and the
/// viewport's top edge is `y == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
	pub x: i32,
	pub y: i32,
	pub width: i32,
	pub height: i32,
}

impl Rect {
	pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
		Self { x, y, width, height }
	}

	pub const fn top(&self) -> i32 {
		self.y
	}

	pub const fn bottom(&self) -> i32 {
		self.y + self.height
	}

	pub const fn left(&self) -> i32 {
		self.x
	}

	pub const fn right(&self) -> i32 {
		self.x + self.width
	}

	/// Inclusive origin, exclusive far edges.
	pub const fn contains(&self, x: i32, y: i32) -> bool {
		x >= self.left() && x < self.right() && y >= self.top() && y < self.bottom()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelSide {
	#[default]
	Above,
	Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
	pub rect: Rect,
	pub side: PanelSide,
}

/// Anchors a panel of `panel_height` to `anchor`.
///
/// The panel sits above the anchor with its bottom edge `gap` above the
/// anchor's top, and flips below (top edge `gap` under the anchor's bottom)
/// when that would push its top above the viewport. Width always follows the
/// anchor.
pub fn place_panel(anchor: Rect, panel_height: i32, gap: i32) -> Placement {
	let above = anchor.top() - panel_height - gap;
	let (y, side) = if above < 0 {
		(anchor.bottom() + gap, PanelSide::Below)
	} else {
		(above, PanelSide::Above)
	};
	Placement {
		rect: Rect::new(anchor.left(), y, anchor.width, panel_height),
		side,
	}
}
