#![allow(dead_code)]

use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub async fn send_msg<W: AsyncWriteExt + Unpin>(writer: &mut W, msg: &Value) {
    let body = msg.to_string();
    let content = format!("Content-Length: {}\r\n\r\n{}", body.len(), body);
    writer.write_all(content.as_bytes()).await.unwrap();
    writer.flush().await.unwrap();
}

pub async fn recv_msg<R: AsyncReadExt + Unpin>(reader: &mut R) -> Option<Value> {
    // Read headers until \r\n\r\n, then Content-Length bytes of body.
    let mut buffer = Vec::new();
    let mut content_length = 0;

    loop {
        let byte = reader.read_u8().await.ok()?;
        buffer.push(byte);
        if buffer.ends_with(b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer);
            for line in headers.lines() {
                if let Some(value) = line.to_lowercase().strip_prefix("content-length:") {
                    content_length = value.trim().parse().unwrap_or_else(|e| {
                        panic!("Failed to parse Content-Length: {e}, header: {line}")
                    });
                }
            }
            break;
        }
    }

    if content_length == 0 {
        return None;
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await.ok()?;
    serde_json::from_slice(&body).ok()
}

/// Reads messages until one satisfies `pred`, skipping the rest.
pub async fn recv_until<R, F>(reader: &mut R, pred: F) -> Value
where
    R: AsyncReadExt + Unpin,
    F: Fn(&Value) -> bool,
{
    tokio::time::timeout(Duration::from_secs(20), async {
        loop {
            let msg = recv_msg(reader).await.expect("server closed the stream");
            if pred(&msg) {
                return msg;
            }
        }
    })
    .await
    .expect("timed out waiting for message")
}

/// Reads until the response to request `id`.
pub async fn recv_response<R: AsyncReadExt + Unpin>(reader: &mut R, id: u64) -> Value {
    recv_until(reader, |msg| msg["id"] == id && msg.get("method").is_none()).await
}

/// Reads until a notification with the given method.
pub async fn recv_notification<R: AsyncReadExt + Unpin>(reader: &mut R, method: &str) -> Value {
    recv_until(reader, |msg| msg["method"] == method).await
}
