//! Immediate-mode renderers. Each function reads [`crate::state::AppState`]
//! and draws one region; only the side panel writes back (through
//! `AppState::apply_selection`).

pub mod overview;
pub mod panels;
pub mod plot;
