// Route definitions

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use warp::Filter;

use crate::chat::ChatSettings;
use crate::handlers;
use crate::llm::LlmProvider;
use crate::quotes::QuoteService;

/// What every chat connection starts from
#[derive(Clone)]
pub struct ChatContext {
    pub provider: Arc<dyn LlmProvider>,
    pub settings: ChatSettings,
}

/// Shared state handed to the handlers
#[derive(Clone)]
pub struct AppState {
    pub quotes: Arc<QuoteService>,
    pub chat: ChatContext,
    pub static_dir: PathBuf,
}

fn with_quotes(
    quotes: Arc<QuoteService>,
) -> impl Filter<Extract = (Arc<QuoteService>,), Error = Infallible> + Clone {
    warp::any().map(move || quotes.clone())
}

fn with_chat(chat: ChatContext) -> impl Filter<Extract = (ChatContext,), Error = Infallible> + Clone {
    warp::any().map(move || chat.clone())
}

pub fn configure_routes(
    state: AppState,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    // GET /
    let chat_page = warp::path::end()
        .and(warp::get())
        .and_then(handlers::chat_page_handler);

    // GET /quotes
    let list_quotes = warp::path("quotes")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_quotes(state.quotes.clone()))
        .and_then(handlers::list_quotes_handler);

    // GET /quotes/random
    let random_quote = warp::path("quotes")
        .and(warp::path("random"))
        .and(warp::path::end())
        .and(warp::get())
        .and(with_quotes(state.quotes))
        .and_then(handlers::random_quote_handler);

    // GET /ai-ws
    let chat_socket = warp::path("ai-ws")
        .and(warp::path::end())
        .and(warp::ws())
        .and(with_chat(state.chat))
        .map(handlers::chat_socket_handler);

    // GET /static/*
    let assets = warp::path("static").and(warp::fs::dir(state.static_dir));

    chat_page
        .or(list_quotes)
        .or(random_quote)
        .or(chat_socket)
        .or(assets)
}
