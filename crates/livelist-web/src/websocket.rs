//! WebSocket handler for live refresh pulses.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use livelist_core::Pulse;
use tracing::{debug, info};

use crate::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle an individual watch connection.
///
/// The connection's subscription lives inside the send task; whichever side
/// finishes first aborts the other, which drops the subscription and
/// unregisters the observer.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut subscription = state.notifier.subscribe();
    let observer_id = subscription.id();

    info!(
        observer_id = %observer_id,
        observers = state.notifier.observer_count(),
        "WebSocket client connected"
    );

    // Forward pulses to this client
    let mut send_task = tokio::spawn(async move {
        while subscription.recv().await.is_some() {
            if sender
                .send(Message::Text(Pulse::SENTINEL.into()))
                .await
                .is_err()
            {
                debug!("WebSocket send failed, client disconnected");
                break;
            }
        }
    });

    // Drain incoming frames until the client goes away
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => {
                    debug!("Received from WebSocket client: {}", text.as_str());
                }
                Message::Close(_) => {
                    debug!("WebSocket client sent close frame");
                    break;
                }
                _ => {}
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    info!(observer_id = %observer_id, "WebSocket client disconnected");
}
