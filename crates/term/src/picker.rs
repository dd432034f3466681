//! Interactive one-line path picker.
//!
//! The prompt sits on the second-to-last terminal row, so the suggestion
//! panel normally opens above it. [`Picker`] translates crossterm events into
//! [`InlineSuggest`] calls and paints the panel model; [`run`] owns the
//! terminal. The panel never grows past the rows above the prompt; when it
//! holds more candidates than fit, the painted window follows the highlight.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
	self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event, KeyCode, KeyEvent,
	KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, queue};
use vae_suggest::{InlineSuggest, InputField, Rect, SuggestKey, SuggestionSource, TextField, Viewport, ViewportEvent};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const PANEL_GAP_ROWS: i32 = 1;

/// What a handled event means for the picker as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	Pending,
	Accept(String),
	Cancel,
}

pub struct Picker<S: SuggestionSource> {
	prompt: String,
	suggest: InlineSuggest<TextField, S>,
	viewport: Viewport,
	committed: Rc<RefCell<Option<String>>>,
	rows: u16,
}

impl<S: SuggestionSource> Picker<S> {
	pub fn new(prompt: &str, source: S, size: (u16, u16)) -> Self {
		let prompt = format!("{prompt}: ");
		let viewport = Viewport::new();
		let committed = Rc::new(RefCell::new(None));
		let sink = Rc::clone(&committed);
		let field = TextField::new(field_bounds(&prompt, size));
		let suggest = InlineSuggest::attach(field, source, &viewport, move |path| {
			*sink.borrow_mut() = Some(path.to_string());
		})
		.with_gap(PANEL_GAP_ROWS);

		Self {
			prompt,
			suggest,
			viewport,
			committed,
			rows: size.1,
		}
	}

	pub fn value(&self) -> &str {
		self.suggest.field().value()
	}

	#[cfg(test)]
	pub fn suggest(&self) -> &InlineSuggest<TextField, S> {
		&self.suggest
	}

	pub fn handle(&mut self, event: Event, now: Instant) -> Outcome {
		match event {
			Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
			Event::Mouse(mouse) => self.handle_mouse(mouse),
			Event::FocusGained => {
				self.suggest.on_focus();
				Outcome::Pending
			}
			Event::FocusLost => {
				self.suggest.on_blur(now);
				Outcome::Pending
			}
			Event::Resize(cols, rows) => {
				let bounds = field_bounds(&self.prompt, (cols, rows));
				self.rows = rows;
				self.suggest.field_mut().set_bounds(bounds);
				self.viewport.dispatch(ViewportEvent::Resize {
					width: i32::from(cols),
					height: i32::from(rows),
				});
				Outcome::Pending
			}
			_ => Outcome::Pending,
		}
	}

	/// Runs timers and lays the panel out for the next paint. Returns whether
	/// the panel was hidden, shown or moved.
	pub fn frame(&mut self, now: Instant) -> bool {
		let before = self.panel_layout();
		let hidden = self.suggest.tick(now);
		let height = self.panel_height();
		self.suggest.on_frame(height);
		hidden || before != self.panel_layout()
	}

	/// Candidate count clamped to the rows between the top of the screen and
	/// the prompt.
	fn panel_height(&self) -> i32 {
		let rows = self.suggest.panel().map_or(0, |panel| panel.rows().len());
		let room = (self.suggest.field().bounds().top() - PANEL_GAP_ROWS).max(0);
		i32::try_from(rows).unwrap_or(i32::MAX).min(room)
	}

	fn panel_layout(&self) -> Option<(bool, Option<Rect>)> {
		self.suggest.panel().map(|panel| (panel.is_visible(), panel.rect()))
	}

	/// Index of the first painted row: zero, or just enough to keep the
	/// highlighted row on the last line of the panel.
	fn first_row(&self, height: usize) -> usize {
		self.suggest
			.session()
			.highlighted()
			.map_or(0, |index| (index + 1).saturating_sub(height))
	}

	pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
		queue!(out, Clear(ClearType::All))?;

		if let Some(panel) = self.suggest.panel().filter(|panel| panel.is_visible())
			&& let Some(rect) = panel.rect()
		{
			let width = usize::try_from(rect.width).unwrap_or(0);
			let height = usize::try_from(rect.height).unwrap_or(0);
			let first = self.first_row(height);
			for (offset, row) in panel.rows().iter().skip(first).take(height).enumerate() {
				let Some(y) = cell(rect.y + offset as i32).filter(|&y| y < self.rows) else {
					continue;
				};
				let x = cell(rect.x).unwrap_or(0);
				queue!(out, MoveTo(x, y))?;
				if row.active {
					queue!(out, SetAttribute(Attribute::Reverse))?;
				}
				queue!(out, Print(clip(&row.title, width)))?;
				if let Some(detail) = &row.detail {
					let room = width.saturating_sub(row.title.chars().count() + 2);
					if room > 0 {
						queue!(out, SetAttribute(Attribute::Dim), Print("  "), Print(clip(detail, room)))?;
					}
				}
				queue!(out, SetAttribute(Attribute::Reset))?;
			}
		}

		let field = self.suggest.field();
		let bounds = field.bounds();
		let y = cell(bounds.y).unwrap_or(0);
		let cursor_x = bounds.x + i32::try_from(field.cursor_column()).unwrap_or(0);
		queue!(
			out,
			MoveTo(0, y),
			Print(&self.prompt),
			Print(field.value()),
			MoveTo(cell(cursor_x).unwrap_or(0), y),
			Show
		)?;
		out.flush()
	}

	fn handle_key(&mut self, key: KeyEvent) -> Outcome {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		match key.code {
			KeyCode::Char('c') if ctrl => Outcome::Cancel,
			KeyCode::Down => {
				self.suggest.on_key(SuggestKey::ArrowDown);
				Outcome::Pending
			}
			KeyCode::Up => {
				self.suggest.on_key(SuggestKey::ArrowUp);
				Outcome::Pending
			}
			KeyCode::Enter => {
				if self.suggest.on_key(SuggestKey::Enter) {
					return self.take_commit();
				}
				let typed = self.value().trim();
				if typed.is_empty() {
					Outcome::Pending
				} else {
					Outcome::Accept(typed.to_string())
				}
			}
			KeyCode::Esc => {
				if self.suggest.on_key(SuggestKey::Escape) {
					Outcome::Pending
				} else {
					Outcome::Cancel
				}
			}
			KeyCode::Char(ch) if !ctrl => {
				self.suggest.field_mut().insert_char(ch);
				self.suggest.on_input();
				Outcome::Pending
			}
			KeyCode::Backspace => {
				if self.suggest.field_mut().backspace() {
					self.suggest.on_input();
				}
				Outcome::Pending
			}
			KeyCode::Left => {
				self.suggest.field_mut().move_left();
				Outcome::Pending
			}
			KeyCode::Right => {
				self.suggest.field_mut().move_right();
				Outcome::Pending
			}
			_ => Outcome::Pending,
		}
	}

	fn handle_mouse(&mut self, mouse: MouseEvent) -> Outcome {
		let row = self.row_at(i32::from(mouse.column), i32::from(mouse.row));
		match mouse.kind {
			MouseEventKind::Moved => {
				if let Some(index) = row {
					self.suggest.on_pointer_hover(index);
				}
				Outcome::Pending
			}
			MouseEventKind::Down(MouseButton::Left) => match row {
				Some(index) if self.suggest.on_pointer_click(index) => self.take_commit(),
				_ => Outcome::Pending,
			},
			MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
				self.viewport.dispatch(ViewportEvent::Scroll);
				Outcome::Pending
			}
			_ => Outcome::Pending,
		}
	}

	/// Panel row under the pointer.
	fn row_at(&self, x: i32, y: i32) -> Option<usize> {
		let panel = self.suggest.panel().filter(|panel| panel.is_visible())?;
		let rect = panel.rect()?;
		if !rect.contains(x, y) {
			return None;
		}
		let height = usize::try_from(rect.height).ok()?;
		Some(self.first_row(height) + usize::try_from(y - rect.y).ok()?)
	}

	fn take_commit(&mut self) -> Outcome {
		match self.committed.borrow_mut().take() {
			Some(path) => Outcome::Accept(path),
			None => Outcome::Pending,
		}
	}
}

/// Field rectangle for a terminal of `(cols, rows)`: the prompt row is one
/// above the last row, and the field starts right after the prompt.
pub fn field_bounds(prompt: &str, (cols, rows): (u16, u16)) -> Rect {
	let x = i32::try_from(prompt.chars().count()).unwrap_or(0);
	let y = i32::from(rows).saturating_sub(2).max(0);
	Rect::new(x, y, (i32::from(cols) - x).max(1), 1)
}

fn cell(value: i32) -> Option<u16> {
	u16::try_from(value).ok()
}

fn clip(text: &str, width: usize) -> String {
	text.chars().take(width).collect()
}

/// Restores the terminal even when the picker bails out early.
struct TerminalGuard;

impl TerminalGuard {
	fn enter() -> io::Result<Self> {
		terminal::enable_raw_mode()?;
		let guard = Self;
		execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, EnableFocusChange, Hide)?;
		Ok(guard)
	}
}

impl Drop for TerminalGuard {
	fn drop(&mut self) {
		let _ = execute!(io::stdout(), DisableFocusChange, DisableMouseCapture, LeaveAlternateScreen, Show);
		let _ = terminal::disable_raw_mode();
	}
}

/// Takes over the terminal until the user accepts or cancels. Returns the
/// committed suggestion or typed text, or `None` when cancelled.
pub fn run<S: SuggestionSource>(prompt: &str, source: S) -> anyhow::Result<Option<String>> {
	let _guard = TerminalGuard::enter()?;
	let mut picker = Picker::new(prompt, source, terminal::size()?);
	let mut out = io::stdout();
	tracing::debug!(prompt, "picker.open");

	let mut dirty = true;
	loop {
		dirty |= picker.frame(Instant::now());
		if dirty {
			picker.draw(&mut out)?;
			dirty = false;
		}
		if !event::poll(POLL_INTERVAL)? {
			continue;
		}
		match picker.handle(event::read()?, Instant::now()) {
			Outcome::Pending => dirty = true,
			Outcome::Accept(value) => {
				tracing::debug!(value = %value, "picker.accept");
				return Ok(Some(value));
			}
			Outcome::Cancel => {
				tracing::debug!("picker.cancel");
				return Ok(None);
			}
		}
	}
}
