//! falcon-lookup: concurrent email OSINT probes with a deterministic risk score.

pub mod cli;
pub mod config;
pub mod core;
pub mod modules;
pub mod pipeline;
pub mod server;
