//! Utility types and functions
//!
//! - [`span`] - source positions
//! - [`diagnostic`] - diagnostics, error codes, renderers
//! - [`config`] - RON configuration
//! - [`logger`] - tracing subscriber setup

pub mod config;
pub mod diagnostic;
pub mod logger;
pub mod span;
