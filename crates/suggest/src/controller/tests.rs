use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::{BLUR_GRACE, InlineSuggest, SuggestKey, SuggestPhase};
use crate::{Candidate, FnSource, InputField, PANEL_GAP, PanelSide, Rect, SuggestionSource, TextField, Viewport, ViewportEvent};

const FRUIT: [&str; 3] = ["Apple", "Apricot", "Banana"];

struct Harness<S> {
	viewport: Viewport,
	suggest: InlineSuggest<TextField, S>,
	commits: Rc<RefCell<Vec<String>>>,
	queries: Rc<Cell<usize>>,
}

fn harness() -> Harness<impl SuggestionSource> {
	let viewport = Viewport::new();
	let commits = Rc::new(RefCell::new(Vec::new()));
	let queries = Rc::new(Cell::new(0));

	let counter = Rc::clone(&queries);
	let source = FnSource(move |query: &str| {
		counter.set(counter.get() + 1);
		let needle = query.to_lowercase();
		FRUIT
			.iter()
			.filter(|name| name.to_lowercase().contains(&needle))
			.map(|name| Candidate::file(format!("Fruit/{name}.md"), *name))
			.collect::<Vec<_>>()
	});
	let sink = Rc::clone(&commits);
	let field = TextField::new(Rect::new(2, 100, 40, 1));
	let suggest = InlineSuggest::attach(field, source, &viewport, move |path| sink.borrow_mut().push(path.to_owned()));

	Harness {
		viewport,
		suggest,
		commits,
		queries,
	}
}

impl<S: SuggestionSource> Harness<S> {
	fn type_text(&mut self, text: &str) {
		self.suggest.field_mut().set_value(text);
		self.suggest.on_input();
	}

	fn panel_visible(&self) -> bool {
		self.suggest.session().is_panel_visible()
	}

	fn highlighted(&self) -> Option<usize> {
		self.suggest.session().highlighted()
	}
}

#[test]
fn typing_shows_candidates_with_nothing_highlighted() {
	let mut h = harness();
	h.type_text("ap");

	assert_eq!(h.suggest.phase(), SuggestPhase::Showing);
	assert_eq!(h.suggest.session().candidates().len(), 2);
	assert_eq!(h.highlighted(), None);
	assert!(h.panel_visible());

	let panel = h.suggest.panel().unwrap();
	assert!(panel.is_displayed());
	assert!(!panel.is_visible(), "panel is revealed only after placement");
}

#[test]
fn first_frame_places_then_reveals() {
	let mut h = harness();
	h.type_text("ap");
	h.suggest.on_frame(2);

	let panel = h.suggest.panel().unwrap();
	assert!(panel.is_visible());
	let placement = panel.placement().unwrap();
	assert_eq!(placement.side, PanelSide::Above);
	assert_eq!(placement.rect, Rect::new(2, 100 - 2 - PANEL_GAP, 40, 2));
}

#[test]
fn clearing_text_goes_idle() {
	let mut h = harness();
	h.type_text("ap");
	h.suggest.on_key(SuggestKey::ArrowDown);
	h.type_text("   ");

	assert_eq!(h.suggest.phase(), SuggestPhase::Idle);
	assert!(h.suggest.session().candidates().is_empty());
	assert_eq!(h.highlighted(), None);
	assert!(!h.panel_visible());
}

#[test]
fn no_matches_goes_idle() {
	let mut h = harness();
	h.type_text("zzz");
	assert_eq!(h.suggest.phase(), SuggestPhase::Idle);
	assert!(!h.panel_visible());
	assert!(!h.suggest.on_key(SuggestKey::ArrowDown));
}

#[test]
fn arrows_clamp_to_bounds() {
	let mut h = harness();
	h.type_text("a");
	assert_eq!(h.suggest.session().candidates().len(), 3);

	assert!(h.suggest.on_key(SuggestKey::ArrowUp));
	assert_eq!(h.highlighted(), None);

	for _ in 0..5 {
		h.suggest.on_key(SuggestKey::ArrowDown);
	}
	assert_eq!(h.highlighted(), Some(2));

	h.suggest.on_key(SuggestKey::ArrowUp);
	h.suggest.on_key(SuggestKey::ArrowUp);
	assert_eq!(h.highlighted(), Some(0));
	h.suggest.on_key(SuggestKey::ArrowUp);
	h.suggest.on_key(SuggestKey::ArrowUp);
	assert_eq!(h.highlighted(), None);
}

#[test]
fn highlight_is_mirrored_on_panel_rows() {
	let mut h = harness();
	h.type_text("a");
	h.suggest.on_key(SuggestKey::ArrowDown);
	h.suggest.on_key(SuggestKey::ArrowDown);

	let rows = h.suggest.panel().unwrap().rows();
	assert_eq!(rows.iter().position(|row| row.active), Some(1));
	assert_eq!(rows[1].detail.as_deref(), Some("Fruit/Apricot.md"));
}

#[test]
fn enter_without_highlight_is_noop() {
	let mut h = harness();
	h.type_text("ap");

	assert!(h.suggest.on_key(SuggestKey::Enter));
	assert!(h.commits.borrow().is_empty());
	assert!(h.panel_visible());
	assert_eq!(h.suggest.phase(), SuggestPhase::Showing);
	assert_eq!(h.suggest.field().value(), "ap");
}

#[test]
fn enter_commits_highlighted_candidate() {
	let mut h = harness();
	h.type_text("ap");
	h.suggest.on_key(SuggestKey::ArrowDown);
	h.suggest.on_key(SuggestKey::ArrowDown);
	h.suggest.on_key(SuggestKey::Enter);

	assert_eq!(*h.commits.borrow(), vec!["Fruit/Apricot.md".to_owned()]);
	assert_eq!(h.suggest.field().value(), "Fruit/Apricot.md");
	assert_eq!(h.suggest.phase(), SuggestPhase::Committed);
	assert!(!h.panel_visible());
	assert_eq!(h.highlighted(), None);
}

#[test]
fn escape_cancels_without_commit() {
	let mut h = harness();
	h.type_text("ap");
	h.suggest.on_key(SuggestKey::ArrowDown);

	assert!(h.suggest.on_key(SuggestKey::Escape));
	assert_eq!(h.suggest.phase(), SuggestPhase::Cancelled);
	assert!(!h.panel_visible());
	assert!(h.commits.borrow().is_empty());
	assert!(!h.suggest.on_key(SuggestKey::Escape), "hidden panel leaves keys to the host");
}

#[test]
fn hover_highlights_and_click_commits_any_row() {
	let mut h = harness();
	h.type_text("a");
	h.suggest.on_pointer_hover(1);
	assert_eq!(h.highlighted(), Some(1));

	h.suggest.on_pointer_hover(7);
	assert_eq!(h.highlighted(), Some(1));

	assert!(h.suggest.on_pointer_click(2));
	assert_eq!(*h.commits.borrow(), vec!["Fruit/Banana.md".to_owned()]);
	assert!(!h.suggest.on_pointer_click(0), "hidden panel ignores clicks");
}

#[test]
fn late_click_within_blur_grace_still_commits() {
	let mut h = harness();
	h.type_text("ban");
	let t0 = Instant::now();
	h.suggest.on_blur(t0);

	assert!(!h.suggest.tick(t0 + Duration::from_millis(100)));
	assert!(h.panel_visible());
	assert!(h.suggest.on_pointer_click(0));
	assert_eq!(*h.commits.borrow(), vec!["Fruit/Banana.md".to_owned()]);
}

#[test]
fn blur_hides_after_grace() {
	let mut h = harness();
	h.type_text("ap");
	h.suggest.on_key(SuggestKey::ArrowDown);
	let t0 = Instant::now();
	h.suggest.on_blur(t0);
	assert!(h.suggest.hide_pending());

	assert!(h.suggest.tick(t0 + BLUR_GRACE));
	assert!(!h.panel_visible());
	assert_eq!(h.highlighted(), None);
	assert_eq!(h.suggest.phase(), SuggestPhase::Idle);
	assert!(!h.suggest.hide_pending());
}

#[test]
fn focus_reshows_without_requery() {
	let mut h = harness();
	h.type_text("ap");
	let t0 = Instant::now();
	h.suggest.on_blur(t0);
	h.suggest.tick(t0 + BLUR_GRACE);
	let queried = h.queries.get();

	h.suggest.on_focus();
	assert!(h.panel_visible());
	assert_eq!(h.suggest.phase(), SuggestPhase::Showing);
	assert_eq!(h.suggest.session().candidates().len(), 2);
	assert_eq!(h.queries.get(), queried);
}

#[test]
fn focus_cancels_pending_blur() {
	let mut h = harness();
	h.type_text("ap");
	let t0 = Instant::now();
	h.suggest.on_blur(t0);
	h.suggest.on_focus();

	assert!(!h.suggest.tick(t0 + BLUR_GRACE * 2));
	assert!(h.panel_visible());
}

#[test]
fn focus_with_empty_text_stays_hidden() {
	let mut h = harness();
	h.type_text("ap");
	h.suggest.on_key(SuggestKey::Escape);
	h.suggest.field_mut().set_value("");

	h.suggest.on_focus();
	assert!(!h.panel_visible());
}

#[test]
fn scroll_repositions_visible_panel_only() {
	let mut h = harness();
	h.type_text("a");
	h.suggest.on_frame(3);
	assert_eq!(h.suggest.panel().unwrap().side(), Some(PanelSide::Above));

	h.suggest.field_mut().set_bounds(Rect::new(2, 1, 40, 1));
	h.suggest.on_frame(3);
	assert_eq!(
		h.suggest.panel().unwrap().side(),
		Some(PanelSide::Above),
		"no reposition without a viewport event"
	);

	assert_eq!(h.viewport.dispatch(ViewportEvent::Scroll), 1);
	h.suggest.on_frame(3);
	let placement = h.suggest.panel().unwrap().placement().unwrap();
	assert_eq!(placement.side, PanelSide::Below);
	assert_eq!(placement.rect.top(), 2 + PANEL_GAP);
	assert_eq!(h.suggest.phase(), SuggestPhase::Showing);
	assert_eq!(h.suggest.session().candidates().len(), 3);

	h.suggest.on_key(SuggestKey::Escape);
	h.suggest.field_mut().set_bounds(Rect::new(2, 100, 40, 1));
	h.viewport.dispatch(ViewportEvent::Resize { width: 80, height: 24 });
	h.suggest.on_frame(3);
	let panel = h.suggest.panel().unwrap();
	assert!(!panel.is_visible());
	assert_eq!(panel.side(), Some(PanelSide::Below));
}

#[test]
fn destroy_is_idempotent_and_detaches_listeners() {
	let mut h = harness();
	assert_eq!(h.viewport.listener_count(), 2);
	h.type_text("ap");

	h.suggest.destroy();
	assert!(h.suggest.is_destroyed());
	assert_eq!(h.viewport.listener_count(), 0);
	assert!(h.suggest.panel().is_none());

	h.suggest.destroy();
	assert_eq!(h.viewport.listener_count(), 0);

	h.type_text("ban");
	assert!(!h.suggest.on_key(SuggestKey::ArrowDown));
	assert!(!h.suggest.on_pointer_click(0));
	h.suggest.on_frame(3);
	assert!(!h.panel_visible());
	assert!(h.commits.borrow().is_empty());
}

#[test]
fn dropping_binding_detaches_listeners() {
	let h = harness();
	let viewport = h.viewport.clone();
	assert_eq!(viewport.listener_count(), 2);
	drop(h);
	assert_eq!(viewport.listener_count(), 0);
}

#[test]
fn custom_gap_is_used_for_placement() {
	let viewport = Viewport::new();
	let source = FnSource(|_: &str| vec![Candidate::folder("x", "x")]);
	let field = TextField::new(Rect::new(0, 10, 20, 1)).with_value("x");
	let mut suggest = InlineSuggest::attach(field, source, &viewport, |_| {}).with_gap(1);
	suggest.on_input();
	suggest.on_frame(1);
	assert_eq!(suggest.panel().unwrap().rect().map(|rect| rect.top()), Some(8));
}

#[derive(Debug, Clone)]
enum Op {
	Type(String),
	Key(SuggestKey),
	Hover(usize),
	Click(usize),
	Focus,
	Blur,
	Tick(u64),
	Frame,
	Scroll,
}

fn op() -> impl Strategy<Value = Op> {
	prop_oneof![
		"[abnp ]{0,3}".prop_map(Op::Type),
		prop_oneof![
			Just(SuggestKey::ArrowDown),
			Just(SuggestKey::ArrowUp),
			Just(SuggestKey::Enter),
			Just(SuggestKey::Escape),
		]
		.prop_map(Op::Key),
		(0usize..4).prop_map(Op::Hover),
		(0usize..4).prop_map(Op::Click),
		Just(Op::Focus),
		Just(Op::Blur),
		(0u64..300).prop_map(Op::Tick),
		Just(Op::Frame),
		Just(Op::Scroll),
	]
}

proptest! {
	#[test]
	fn session_invariants_hold(ops in prop::collection::vec(op(), 1..40)) {
		let mut h = harness();
		let t0 = Instant::now();
		for op in ops {
			match op {
				Op::Type(text) => h.type_text(&text),
				Op::Key(key) => {
					h.suggest.on_key(key);
				}
				Op::Hover(idx) => h.suggest.on_pointer_hover(idx),
				Op::Click(idx) => {
					h.suggest.on_pointer_click(idx);
				}
				Op::Focus => h.suggest.on_focus(),
				Op::Blur => h.suggest.on_blur(t0),
				Op::Tick(ms) => {
					h.suggest.tick(t0 + Duration::from_millis(ms));
				}
				Op::Frame => h.suggest.on_frame(3),
				Op::Scroll => {
					h.viewport.dispatch(ViewportEvent::Scroll);
				}
			}

			let session = h.suggest.session();
			if session.is_panel_visible() {
				prop_assert!(!session.candidates().is_empty());
			}
			if session.candidates().is_empty() {
				prop_assert_eq!(session.highlighted(), None);
			}
			if let Some(idx) = session.highlighted() {
				prop_assert!(idx < session.candidates().len());
			}
			let panel = h.suggest.panel().unwrap();
			prop_assert_eq!(panel.is_displayed(), session.is_panel_visible());
		}
	}
}
