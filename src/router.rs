//! Path-keyed request routing.
//!
//! The route table is populated once at startup and frozen behind an `Arc`
//! before serving begins; sessions only ever call [`Router::lookup`], so no
//! locking is needed on the request path.

use crate::http::request::Request;
use crate::http::response::Response;
use std::collections::HashMap;

/// A registered request handler.
///
/// Handlers are pure request-in, response-out: they never see the underlying
/// connection, and an `Err` is translated by the session into a 500 response.
pub type Handler = Box<dyn Fn(&Request) -> anyhow::Result<Response> + Send + Sync>;

/// Exact-match mapping from request path to handler.
pub struct Router {
    routes: HashMap<String, Handler>,
    not_found: Handler,
}

impl Router {
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
            not_found: Box::new(|_| Ok(Response::not_found())),
        }
    }

    /// Registers a handler for an exact path. A later registration for the
    /// same path replaces the earlier one.
    pub fn register<F>(&mut self, path: impl Into<String>, handler: F)
    where
        F: Fn(&Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.routes.insert(path.into(), Box::new(handler));
    }

    /// Replaces the handler invoked when no path matches.
    pub fn set_not_found<F>(&mut self, handler: F)
    where
        F: Fn(&Request) -> anyhow::Result<Response> + Send + Sync + 'static,
    {
        self.not_found = Box::new(handler);
    }

    /// Returns the handler registered for `path`, or the not-found handler
    /// when there is no exact match. Method, headers and body play no part in
    /// the lookup.
    pub fn lookup(&self, path: &str) -> &Handler {
        self.routes.get(path).unwrap_or(&self.not_found)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
