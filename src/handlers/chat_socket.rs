// GET /ai-ws handler

use futures_util::future;
use futures_util::{SinkExt, StreamExt};
use tracing::{debug, info_span, Instrument};
use uuid::Uuid;
use warp::ws::{Message, WebSocket, Ws};

use crate::chat::{ChatSession, Inbound, Responder};
use crate::routes::ChatContext;

pub fn chat_socket_handler(ws: Ws, chat: ChatContext) -> impl warp::Reply {
    ws.on_upgrade(move |socket| {
        let span = info_span!("chat", connection_id = %Uuid::new_v4());
        run_socket(socket, chat).instrument(span)
    })
}

async fn run_socket(socket: WebSocket, chat: ChatContext) {
    let (tx, rx) = socket.split();

    let outbound = tx.with(|text: String| future::ok::<_, warp::Error>(Message::text(text)));
    let inbound = rx.map(|frame| match frame {
        Ok(message) => to_inbound(&message),
        Err(e) => {
            debug!(error = %e, "WebSocket read failed");
            Inbound::Close
        }
    });

    let responder = Responder::new(chat.provider, chat.settings);
    ChatSession::new(responder)
        .run(Box::pin(outbound), inbound)
        .await;
}

fn to_inbound(message: &Message) -> Inbound {
    if message.is_close() {
        return Inbound::Close;
    }
    match message.to_str() {
        Ok(text) => Inbound::Text(text.to_string()),
        Err(_) => Inbound::Ignored,
    }
}
