//! Titanic Dashboard
//!
//! Filters a passenger table by class and age range and summarises the
//! selection: passenger count, average fare, survival rate, an age
//! histogram and survival counts by sex.
//!
//! The engine lives in [`data`] and has no UI dependencies. [`state`] holds
//! the current selection and its cached results; [`app`] and [`ui`] render
//! them with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod report;
pub mod state;
pub mod ui;
