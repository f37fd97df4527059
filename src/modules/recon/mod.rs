//! Source probes. Each one absorbs its own failures and returns plain data.

pub mod breach;
pub mod enrich;
pub mod identity;
pub mod username;
