//! CLI command implementations.

pub mod algorithms;
pub mod config;
pub mod run;
