//! Core library shared by the `dashboard` and `analyzer` binaries.
//!
//! The data layer (`data`), number formatting (`format`), column
//! configuration (`config`) and application state (`state`) are free of any
//! UI dependency; the `ui` modules and the two `eframe::App` impls are thin
//! rendering shells over them.

pub mod color;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod format;
pub mod state;
pub mod ui;
pub mod viewer;
