//! HTTP protocol implementation.
//!
//! This module implements an HTTP/1.1 server core with support for keep-alive
//! connections.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`session`**: The per-connection handler implementing the request-response state machine
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and parsing utilities
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//!
//! # Session State Machine
//!
//! Each client connection goes through a state machine:
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Wait for incoming request data
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Route to a handler, produce a response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ Keep-Alive → Reading (same connection)
//!               └─ Close → Closing
//! ```
//!
//! `Closing` half-closes the write side so the peer observes end-of-stream.
//! A malformed request is answered with `400 Bad Request` and a close; a
//! transport error or timeout closes without a response.
//!
//! # Example
//!
//! ```ignore
//! use vigil::config::LimitsConfig;
//! use vigil::http::session::Session;
//! use vigil::router::Router;
//! use std::sync::Arc;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let listener = TcpListener::bind("127.0.0.1:8080").await?;
//!     let router = Arc::new(Router::new());
//!     let limits = LimitsConfig::default();
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let router = Arc::clone(&router);
//!         let limits = limits.clone();
//!         tokio::spawn(async move {
//!             let mut session = Session::new(socket, router, &limits);
//!             if let Err(e) = session.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod session;
pub mod writer;
