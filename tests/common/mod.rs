//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use onbid_gateway::config::GatewayConfig;
use onbid_gateway::http::HttpServer;

/// Targets (path + query) received by a mock upstream, in arrival order.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Start a mock upstream that returns fixed XML immediately.
#[allow(dead_code)]
pub async fn start_mock_upstream(xml: &'static str) -> (SocketAddr, RequestLog) {
    start_programmable_upstream(move |_| async move { (200, xml.to_string(), Duration::ZERO) })
        .await
}

/// Start a programmable mock upstream. The closure receives the request
/// target and returns (status, body, artificial delay before replying).
#[allow(dead_code)]
pub async fn start_programmable_upstream<F, Fut>(f: F) -> (SocketAddr, RequestLog)
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String, Duration)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: RequestLog = Arc::new(Mutex::new(Vec::new()));
    let f = Arc::new(f);
    let accept_log = log.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    let log = accept_log.clone();
                    tokio::spawn(async move {
                        let target = match read_request_target(&mut socket).await {
                            Some(target) => target,
                            None => return,
                        };
                        log.lock().unwrap().push(target.clone());

                        let (status, body, delay) = f(target).await;
                        if !delay.is_zero() {
                            tokio::time::sleep(delay).await;
                        }

                        let status_text = match status {
                            200 => "200 OK",
                            404 => "404 Not Found",
                            500 => "500 Internal Server Error",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };
                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/xml\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}

/// Read the request head and return the target (path + query).
async fn read_request_target(socket: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|window| window == b"\r\n\r\n") {
            break;
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let request_line = head.lines().next()?;
    let mut parts = request_line.split_whitespace();
    let _method = parts.next()?;
    parts.next().map(|target| target.to_string())
}

/// Gateway configuration pointed at a mock upstream.
#[allow(dead_code)]
pub fn gateway_config(upstream_addr: SocketAddr, service_key: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    let base = format!("http://{}", upstream_addr);
    config.upstream.thing_base_url = base.clone();
    config.upstream.code_base_url = base;
    config.upstream.service_key = service_key.to_string();
    config.upstream.primary_timeout_ms = 1_000;
    config.upstream.retry_timeout_ms = 1_000;
    config
}

/// Start the gateway on an ephemeral port and return its address.
#[allow(dead_code)]
pub async fn start_gateway(config: GatewayConfig) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    // Give the server a moment to start polling the listener.
    tokio::time::sleep(Duration::from_millis(100)).await;

    addr
}
