//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Start a mock backend that returns a fixed status and body.
pub async fn start_mock_backend(addr: SocketAddr, status: u16, body: &'static str) {
    let listener = TcpListener::bind(addr).await.unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        // Drain whatever arrived before answering.
                        let mut buf = [0u8; 8192];
                        let _ = tokio::time::timeout(
                            Duration::from_millis(100),
                            socket.read(&mut buf),
                        )
                        .await;

                        let response = format!(
                            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            reason(status),
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });
}

/// Start a mock backend that records the raw request text it receives and
/// replies 200. Each captured request is sent on the returned channel.
pub async fn start_recording_backend(addr: SocketAddr) -> mpsc::UnboundedReceiver<String> {
    let listener = TcpListener::bind(addr).await.unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        let mut captured = Vec::new();
                        let mut buf = [0u8; 8192];
                        // Read until the peer pauses; good enough for small
                        // test requests.
                        loop {
                            match tokio::time::timeout(
                                Duration::from_millis(200),
                                socket.read(&mut buf),
                            )
                            .await
                            {
                                Ok(Ok(0)) | Err(_) => break,
                                Ok(Ok(n)) => {
                                    captured.extend_from_slice(&buf[..n]);
                                    if request_complete(&captured) {
                                        break;
                                    }
                                }
                                Ok(Err(_)) => break,
                            }
                        }
                        let _ = tx.send(String::from_utf8_lossy(&captured).into_owned());

                        let response =
                            "HTTP/1.1 200 OK\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok";
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    rx
}

/// True once headers plus any declared body have fully arrived.
fn request_complete(data: &[u8]) -> bool {
    let text = String::from_utf8_lossy(data);
    let Some(header_end) = text.find("\r\n\r\n") else {
        return false;
    };
    let content_length = text
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);
    data.len() >= header_end + 4 + content_length
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        418 => "I'm a teapot",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
