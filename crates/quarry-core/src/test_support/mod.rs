//! Test utilities
//!
//! Scripted collaborators for driving the workflow without a model or a
//! database. Available to other crates through the `test-utils` feature.

pub mod mocks;

pub use mocks::{
    rental_rows, GenerationCall, ScriptedExecutor, ScriptedGenerator, ScriptedRecoverer,
};
