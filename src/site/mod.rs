//! Built-in site handlers.
//!
//! The business endpoints served by the binary: a login acknowledgement, the
//! scoreboard, and a small keyword-matching chat responder. Everything here
//! sits behind the handler contract; the server core never imports this
//! module.

use serde::Serialize;

use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::router::Router;

#[derive(Serialize)]
struct LoginReply<'a> {
    status: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct ScoreEntry<'a> {
    user: &'a str,
    score: u32,
}

#[derive(Serialize)]
struct Scoreboard<'a> {
    scores: Vec<ScoreEntry<'a>>,
}

#[derive(Serialize)]
struct ChatReply<'a> {
    reply: &'a str,
}

/// Assembles the route table served by the binary.
pub fn routes() -> Router {
    let mut router = Router::new();
    router.register("/login", login);
    router.register("/scores", scores);
    router.register("/chat", chat);
    router
}

fn json(body: Vec<u8>) -> Response {
    ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "application/json")
        .body(body)
        .build()
}

pub fn login(_req: &Request) -> anyhow::Result<Response> {
    let reply = LoginReply {
        status: "success",
        message: "login ok",
    };
    Ok(json(serde_json::to_vec(&reply)?))
}

pub fn scores(_req: &Request) -> anyhow::Result<Response> {
    let board = Scoreboard {
        scores: vec![
            ScoreEntry {
                user: "ada",
                score: 1500,
            },
            ScoreEntry {
                user: "grace",
                score: 1200,
            },
        ],
    };
    Ok(json(serde_json::to_vec(&board)?))
}

/// Keyword-matching chat responder over the request body.
pub fn chat(req: &Request) -> anyhow::Result<Response> {
    if req.method != Method::POST {
        return Ok(ResponseBuilder::new(StatusCode::MethodNotAllowed)
            .body(b"405 Method Not Allowed".to_vec())
            .build());
    }

    let message = String::from_utf8_lossy(&req.body).to_lowercase();
    let reply = ChatReply {
        reply: bot_reply(&message),
    };
    Ok(json(serde_json::to_vec(&reply)?))
}

fn bot_reply(message: &str) -> &'static str {
    if message.contains("help") || message.contains("commands") {
        "You can ask about the game, how to download it, or the scoreboard."
    } else if message.contains("hello") || message.contains("hi") {
        "Welcome back. Ready for another round?"
    } else if message.contains("download") {
        "Hit the download button on the front page and check the system requirements first."
    } else if message.contains("score") {
        "The current standings are on /scores."
    } else {
        "I did not catch that. Say 'help' to see what I can answer."
    }
}
