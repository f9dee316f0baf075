// WebSocket client utilities for testing

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

pub struct WebSocketClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl WebSocketClient {
    /// Connect, retrying until the server accepts or `timeout` passes.
    pub async fn connect_retry(
        url: &str,
        timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let start = tokio::time::Instant::now();
        loop {
            match connect_async(url).await {
                Ok((stream, _)) => return Ok(Self { stream }),
                Err(err) => {
                    if start.elapsed() >= timeout {
                        return Err(Box::new(err));
                    }
                    tokio::time::sleep(Duration::from_millis(5)).await;
                }
            }
        }
    }

    pub async fn send(&mut self, text: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Text(text.into())).await?;
        Ok(())
    }

    pub async fn send_json(&mut self, value: &Value) -> Result<(), Box<dyn std::error::Error>> {
        self.send(&value.to_string()).await
    }

    pub async fn send_binary(&mut self, bytes: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.send(Message::Binary(bytes.into())).await?;
        Ok(())
    }

    pub async fn start_game(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.send_json(&json!({"type": "start_game"})).await
    }

    pub async fn send_frame(&mut self, image: &str) -> Result<(), Box<dyn std::error::Error>> {
        self.send_json(&json!({"type": "frame", "image": image})).await
    }

    pub async fn close(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.stream.close(None).await?;
        Ok(())
    }

    /// Next JSON text message. Control frames are skipped; `None` means the
    /// socket closed.
    pub async fn recv_json_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<Value>, Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let next = tokio::time::timeout_at(deadline, self.stream.next())
                .await
                .map_err(|_| "Timeout waiting for message")?;
            match next.transpose()? {
                Some(Message::Text(text)) => return Ok(Some(serde_json::from_str(&text)?)),
                Some(Message::Close(_)) | None => return Ok(None),
                Some(_) => continue,
            }
        }
    }

    /// Skip messages until one of type `kind` arrives.
    pub async fn recv_until(
        &mut self,
        kind: &str,
        timeout: Duration,
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            match self.recv_json_timeout(remaining).await? {
                Some(msg) if msg["type"] == kind => return Ok(msg),
                Some(_) => continue,
                None => return Err(format!("socket closed before {kind}").into()),
            }
        }
    }

    /// Asserts nothing but control frames arrive for `window`.
    pub async fn expect_silence(&mut self, window: Duration) -> Result<(), Box<dyn std::error::Error>> {
        match tokio::time::timeout(window, self.recv_json_timeout(window * 2)).await {
            Err(_) => Ok(()),
            Ok(Ok(None)) => Ok(()),
            Ok(Ok(Some(msg))) => Err(format!("unexpected message {msg}").into()),
            Ok(Err(err)) => Err(err),
        }
    }
}
