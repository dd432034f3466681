//! Text inputs the controller can bind to.

use crate::geometry::Rect;

/// The host's text input as seen by [`InlineSuggest`](crate::InlineSuggest).
pub trait InputField {
	fn value(&self) -> &str;

	/// Overwrites the displayed text.
	fn set_value(&mut self, value: &str);

	/// Bounding box in viewport coordinates.
	fn bounds(&self) -> Rect;
}

/// Single-line editable buffer with a byte cursor that always sits on a char
/// boundary.
#[derive(Debug, Clone, Default)]
pub struct TextField {
	value: String,
	cursor: usize,
	bounds: Rect,
}

impl TextField {
	pub fn new(bounds: Rect) -> Self {
		Self {
			bounds,
			..Self::default()
		}
	}

	pub fn with_value(mut self, value: &str) -> Self {
		self.set_value(value);
		self
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Cursor position in chars, for hosts that lay text out by cell.
	pub fn cursor_column(&self) -> usize {
		self.value[..self.cursor].chars().count()
	}

	pub fn set_bounds(&mut self, bounds: Rect) {
		self.bounds = bounds;
	}

	pub fn insert_char(&mut self, ch: char) {
		self.value.insert(self.cursor, ch);
		self.cursor += ch.len_utf8();
	}

	/// Removes the char before the cursor. Returns whether anything changed.
	pub fn backspace(&mut self) -> bool {
		let Some(prev) = self.value[..self.cursor].chars().next_back() else {
			return false;
		};
		self.cursor -= prev.len_utf8();
		self.value.remove(self.cursor);
		true
	}

	pub fn move_left(&mut self) {
		if let Some(prev) = self.value[..self.cursor].chars().next_back() {
			self.cursor -= prev.len_utf8();
		}
	}

	pub fn move_right(&mut self) {
		if let Some(next) = self.value[self.cursor..].chars().next() {
			self.cursor += next.len_utf8();
		}
	}

	pub fn clear(&mut self) {
		self.value.clear();
		self.cursor = 0;
	}
}

impl InputField for TextField {
	fn value(&self) -> &str {
		&self.value
	}

	fn set_value(&mut self, value: &str) {
		self.value = value.to_owned();
		self.cursor = self.value.len();
	}

	fn bounds(&self) -> Rect {
		self.bounds
	}
}

#[cfg(test)]
mod tests {
	use super::{InputField, TextField};
	use crate::geometry::Rect;

	#[test]
	fn editing_respects_char_boundaries() {
		let mut field = TextField::new(Rect::default()).with_value("né");
		assert_eq!(field.cursor(), 3);
		field.move_left();
		assert_eq!(field.cursor(), 1);
		field.insert_char('x');
		assert_eq!(field.value(), "nxé");
		assert_eq!(field.cursor_column(), 2);
		field.move_right();
		assert!(field.backspace());
		assert_eq!(field.value(), "nx");
	}

	#[test]
	fn backspace_at_start_is_noop() {
		let mut field = TextField::new(Rect::default()).with_value("a");
		field.move_left();
		assert!(!field.backspace());
		assert_eq!(field.value(), "a");
	}

	#[test]
	fn set_value_moves_cursor_to_end() {
		let mut field = TextField::default();
		field.set_value("Projects/Alpha");
		assert_eq!(field.cursor(), "Projects/Alpha".len());
		field.clear();
		assert_eq!(field.value(), "");
	}
}
