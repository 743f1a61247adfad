//! vrating: rule-based trader performance rating on a 0-10 scale.
//!
//! Hexagonal architecture: the pure rating engine in [`domain`], port traits in
//! [`ports`], file-backed implementations in [`adapters`], and the command
//! line in [`cli`].

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod ports;
