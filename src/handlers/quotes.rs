// GET /quotes and GET /quotes/random handlers

use std::convert::Infallible;
use std::sync::Arc;
use tracing::{info, warn};
use warp::http::StatusCode;

use crate::models::ErrorResponse;
use crate::quotes::{QuoteError, QuoteService};

pub async fn random_quote_handler(
    service: Arc<QuoteService>,
) -> Result<impl warp::Reply, Infallible> {
    info!("GET /quotes/random");

    match service.random_quote().await {
        Ok(quote) => Ok(warp::reply::with_status(
            warp::reply::json(&quote),
            StatusCode::OK,
        )),
        Err(e) => Ok(error_reply(e)),
    }
}

pub async fn list_quotes_handler(service: Arc<QuoteService>) -> Result<impl warp::Reply, Infallible> {
    info!("GET /quotes");

    match service.all_quotes().await {
        Ok(quotes) => Ok(warp::reply::with_status(
            warp::reply::json(&quotes),
            StatusCode::OK,
        )),
        Err(e) => Ok(error_reply(e)),
    }
}

fn error_reply(err: QuoteError) -> warp::reply::WithStatus<warp::reply::Json> {
    let status = if err.is_upstream() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    warn!(error = %err, status = status.as_u16(), "Quote request failed");

    warp::reply::with_status(
        warp::reply::json(&ErrorResponse::new(err.to_string())),
        status,
    )
}
