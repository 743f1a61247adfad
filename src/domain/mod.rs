//! Core domain types and the rating engine.

pub mod band;
pub mod config_validation;
pub mod consistency;
pub mod emotion;
pub mod emotional_discipline;
pub mod error;
pub mod journaling;
pub mod profitability;
pub mod rating;
pub mod risk;
pub mod stats;
pub mod trade;
