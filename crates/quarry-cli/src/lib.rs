//! Quarry command-line front-end
//!
//! Thin I/O shells around [`quarry_core::QueryWorkflow`]: one-shot questions,
//! an interactive chat loop with conversation memory, schema printing and
//! the HTTP server.

pub mod cli;
pub mod commands;
pub mod factories;
pub mod interaction_log;
pub mod logging;
pub mod output;
