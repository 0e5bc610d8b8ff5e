// This file makes the crate a library and declares modules for use
// by the binary (main.rs) and integration tests.

pub mod actions;
pub mod api;
pub mod app;
pub mod config;
pub mod monitor;
pub mod typeahead;
pub mod ui;
