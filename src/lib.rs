//! Vigil - Minimal HTTP/1.1 Server Core
//!
//! An accept loop, a per-connection session state machine with keep-alive,
//! and a path-keyed router that handlers plug into.

pub mod config;
pub mod http;
pub mod router;
pub mod server;
pub mod site;
