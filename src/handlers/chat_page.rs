// GET / handler

use std::convert::Infallible;

const CHAT_PAGE: &str = include_str!("../../templates/chat.html");

pub async fn chat_page_handler() -> Result<impl warp::Reply, Infallible> {
    Ok(warp::reply::html(CHAT_PAGE))
}
