//! # WebSocket Adapter
//!
//! Push-channel transport over the witness service's `/events` endpoint.

use crate::domain::ClientError;
use crate::ports::{EventStream, StreamConnector};
use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};

/// WebSocket implementation of [`StreamConnector`].
pub struct WsStreamConnector {
    ws_url: String,
}

impl WsStreamConnector {
    /// Create a connector for `ws_url`.
    pub fn new(ws_url: String) -> Self {
        Self { ws_url }
    }
}

#[async_trait]
impl StreamConnector for WsStreamConnector {
    async fn connect(&self) -> Result<Box<dyn EventStream>, ClientError> {
        let (inner, _) = connect_async(&self.ws_url)
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        Ok(Box::new(WsEventStream { inner }))
    }
}

struct WsEventStream {
    inner: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl EventStream for WsEventStream {
    async fn next_frame(&mut self) -> Result<Option<String>, ClientError> {
        while let Some(message) = self.inner.next().await {
            match message {
                Ok(Message::Text(text)) => return Ok(Some(text.to_string())),
                Ok(Message::Ping(data)) => {
                    let _ = self.inner.send(Message::Pong(data)).await;
                }
                Ok(Message::Close(_)) => return Ok(None),
                Ok(_) => {}
                Err(e) => return Err(ClientError::Transport(e.to_string())),
            }
        }
        Ok(None)
    }
}
