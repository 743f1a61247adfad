//! Port traits the CLI talks to; implementations live in [`crate::adapters`].

pub mod config_port;
pub mod report_port;
pub mod trade_port;
