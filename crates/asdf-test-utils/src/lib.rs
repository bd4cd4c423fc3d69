//! Shared test utilities for the asdf workspace.
//!
//! This crate provides standardised fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`git`] - plugin git repositories built from the dummy plugin fixture
//! - [`data`] - [`TestDataDir`](data::TestDataDir) with installed plugins and versions

pub mod data;
pub mod git;

pub use data::TestDataDir;
