//! Shared library surface for the survey server and its tests.

pub mod api;
pub mod config;
pub mod persistence;
pub mod state;
