//! Quarry CLI library
//!
//! Exposes the argument surface, command implementations, and output
//! formatting so integration tests can drive them without spawning the
//! binary.

pub mod cli;
pub mod commands;
pub mod output;
