//! # Better Find Buffer
//!
//! Navigation helpers for an editor's "Find Results" buffer.
//!
//! ## Features
//!
//! * Scanning - Resolve the file, line and column under the caret
//! * Navigation - Jump between file headers and matches, with wrap-around and group scoping
//! * Folding - Collapse a finished group or the directory prefix shared by all headers
//! * Opening - Open a result permanently or as a transient preview, highlighting the search term

/// Immutable buffer snapshots and regions
pub mod buffer;
/// Command layer driven through a host editor
pub mod commands;
/// User settings
pub mod config;
/// Error types
pub mod error;
/// Host editor abstraction
pub mod host;
/// Waiting for opened views to load
pub mod loading;
/// Whole-buffer model of headers, matches and groups
pub mod model;
/// Next/previous candidate selection
pub mod navigator;
/// Path prefix helpers
pub mod paths;
/// Caret-centric buffer scans
pub mod scanner;
/// Logging setup
pub mod telemetry;
