use bytes::{Buf, BytesMut};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::config::LimitsConfig;
use crate::http::parser::{ParseError, parse_http_request};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::router::Router;

/// Drives one accepted connection through its request/response lifecycle.
///
/// Generic over the stream type so tests can run it over in-memory duplex
/// pipes; the listener instantiates it with a `TcpStream`.
pub struct Session<S> {
    stream: S,
    buffer: BytesMut,
    state: SessionState,
    router: Arc<Router>,
    read_timeout: Duration,
    write_timeout: Duration,
    max_request_bytes: usize,
}

pub enum SessionState {
    Reading,
    Dispatching(Request),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closing,
}

/// What a read cycle produced. Transport errors surface separately as `Err`.
enum ReadOutcome {
    Complete(Request),
    Eof,
    Malformed(ParseError),
    TooLarge,
    TimedOut,
}

impl<S> Session<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, router: Arc<Router>, limits: &LimitsConfig) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: SessionState::Reading,
            router,
            read_timeout: limits.read_timeout(),
            write_timeout: limits.write_timeout(),
            max_request_bytes: limits.max_request_bytes,
        }
    }

    /// Runs the session to completion and half-closes the write side once,
    /// however the state machine ended, so the peer observes end-of-stream
    /// rather than a reset where possible.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.drive().await;

        // Peer may already be gone.
        let _ = self.stream.shutdown().await;

        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                SessionState::Reading => {
                    match self.read_request().await? {
                        ReadOutcome::Complete(req) => {
                            self.state = SessionState::Dispatching(req);
                        }
                        ReadOutcome::Eof => {
                            self.state = SessionState::Closing;
                        }
                        ReadOutcome::TimedOut => {
                            debug!("read timed out, closing connection");
                            self.state = SessionState::Closing;
                        }
                        ReadOutcome::Malformed(e) => {
                            warn!("malformed request: {:?}", e);
                            self.state = Self::reject(Response::bad_request());
                        }
                        ReadOutcome::TooLarge => {
                            warn!("request exceeds {} byte cap", self.max_request_bytes);
                            self.state = Self::reject(Response::bad_request());
                        }
                    }
                }

                SessionState::Dispatching(req) => {
                    let handler = self.router.lookup(&req.path);
                    let mut response = match handler(req) {
                        Ok(response) => response,
                        Err(e) => {
                            warn!("handler failed for {}: {:#}", req.path, e);
                            Response::internal_error()
                        }
                    };

                    // Persist only if both sides allow it.
                    let keep_alive = req.keep_alive() && !response.connection_close();
                    finalize_response(&mut response, keep_alive);

                    let writer = ResponseWriter::new(&response);
                    self.state = SessionState::Writing(writer, keep_alive);
                }

                SessionState::Writing(writer, keep_alive) => {
                    match timeout(self.write_timeout, writer.write_to(&mut self.stream)).await {
                        Ok(res) => res?,
                        Err(_) => anyhow::bail!("write timed out"),
                    }

                    if *keep_alive {
                        self.state = SessionState::Reading; // go back for next request
                    } else {
                        self.state = SessionState::Closing;
                    }
                }

                SessionState::Closing => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Answer a protocol error with a final response, then close. This is the
    /// one policy for malformed and oversized requests.
    fn reject(mut response: Response) -> SessionState {
        finalize_response(&mut response, false);
        SessionState::Writing(ResponseWriter::new(&response), false)
    }

    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(ReadOutcome::Complete(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    return Ok(ReadOutcome::Malformed(e));
                }
            }

            if self.buffer.len() >= self.max_request_bytes {
                return Ok(ReadOutcome::TooLarge);
            }

            // Read more data, bounded by the idle timeout
            let n = match timeout(self.read_timeout, self.stream.read_buf(&mut self.buffer)).await {
                Ok(res) => res?,
                Err(_) => return Ok(ReadOutcome::TimedOut),
            };

            if n == 0 {
                // Peer stopped sending; closing silently also covers an EOF
                // mid-request.
                return Ok(ReadOutcome::Eof);
            }
        }
    }
}

/// The session, not the handler, settles the framing headers: every response
/// carries a Content-Length, and a connection about to close says so.
fn finalize_response(response: &mut Response, keep_alive: bool) {
    let body_len = response.body.len();
    response
        .headers
        .entry("Content-Length".to_string())
        .or_insert_with(|| body_len.to_string());

    if !keep_alive {
        response
            .headers
            .insert("Connection".to_string(), "close".to_string());
    }
}
