//! Library entry for Game Hub exposing the catalog core for the binary and integration tests.

pub mod app;
pub mod args;
pub mod catalog;
pub mod config;
pub mod events;
pub mod i18n;
pub mod logic;
pub mod prefs;
pub mod state;
pub mod ui;

#[cfg(test)]
mod test_utils;
