//! Inline suggestions for free-text path pickers.
//!
//! Two pieces cooperate:
//!
//! - [`source`]: pure candidate queries over a fresh vault [`Snapshot`](vae_vault::Snapshot),
//!   one per [`Scope`] (all folders, files of an extension, children of a folder).
//! - [`controller`]: [`InlineSuggest`], bound to one [`InputField`], which owns a
//!   floating [`Panel`], tracks the highlighted row and commits selections back
//!   into the field and to a caller-supplied callback.
//!
//! Data flows keystroke -> [`SuggestionSource::suggest`] -> panel render ->
//! selection -> commit callback. Bindings share nothing but the [`Viewport`]
//! they listen on.

pub mod candidate;
pub mod controller;
pub mod field;
pub mod geometry;
pub mod panel;
pub mod source;
pub mod viewport;

pub use candidate::Candidate;
pub use controller::{BLUR_GRACE, InlineSuggest, SuggestKey, SuggestPhase, SuggestSession};
pub use field::{InputField, TextField};
pub use geometry::{PANEL_GAP, PanelSide, Placement, Rect, place_panel};
pub use panel::{Panel, PanelRow};
pub use source::{
	ChildFolderScope, FileScope, FnSource, FolderScope, MAX_SUGGESTIONS, ROOT_LABEL, Scope, SuggestionSource, VaultSource,
};
pub use viewport::{Subscription, Viewport, ViewportEvent, ViewportEventKind};
