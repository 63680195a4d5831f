// Handlers module

pub mod chat_page;
pub mod chat_socket;
pub mod quotes;

pub use chat_page::chat_page_handler;
pub use chat_socket::chat_socket_handler;
pub use quotes::{list_quotes_handler, random_quote_handler};
