//! commit-clock library
//!
//! This module exports the core functionality of commit-clock for use in
//! integration tests and as a library.

pub mod clockify;
pub mod config;
pub mod sync;
pub mod time;
pub mod tracker;
