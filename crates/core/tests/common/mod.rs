// Shared helpers: a one-shot HTTP server and a recording notification sink.

#![allow(dead_code)]

use std::sync::Mutex;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

use stock_dashboard_core::models::holding::HoldingInput;
use stock_dashboard_core::notifications::{Notification, NotificationSink, Severity};
use stock_dashboard_core::providers::prediction_client::PredictionClient;

// ── Mock HTTP server ────────────────────────────────────────────────

/// Serve exactly one request with a canned JSON response.
///
/// Returns the base URL and a handle resolving to the raw request text.
pub async fn serve_once(status: u16, body: impl Into<String>) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.into();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let request = read_request(&mut socket).await;

        let reason = if status < 400 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}

/// Accept one connection and hold it open without ever answering.
pub async fn serve_silent(hold: std::time::Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (_socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(hold).await;
    });
    format!("http://{addr}")
}

/// A base URL on a port that was just released, so nothing is listening.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

async fn read_request(socket: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let content_length = headers
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Client that ignores proxy environment variables.
pub fn local_client(base_url: &str) -> PredictionClient {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    PredictionClient::with_client(client, base_url)
}

// ── Notifications ───────────────────────────────────────────────────

/// Sink that keeps every notification for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<Notification> {
        self.seen.lock().unwrap().last().cloned()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, title: &str, message: &str, severity: Severity) {
        self.seen
            .lock()
            .unwrap()
            .push(Notification::new(title, message, severity));
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn infosys() -> HoldingInput {
    HoldingInput::new("INFY", "Infosys", 5.0, 1500.0, 1600.0)
}

pub fn tcs() -> HoldingInput {
    HoldingInput::new("TCS", "Tata Consultancy Services", 10.0, 100.0, 120.0)
}

pub fn reliance() -> HoldingInput {
    HoldingInput::new("RELIANCE", "Reliance Industries", 2.0, 2500.0, 2300.0)
}

pub const PREDICTION_BODY: &str = r#"{
    "stockSymbol": "INFY",
    "prediction": {
        "action": "BUY",
        "timing": "Buy within the next 3 days",
        "confidence": 82.5,
        "predictedReturn": 4.2,
        "currentPrice": 1600.0,
        "predictedPrice": 1667.2,
        "volatility": 1.8,
        "marketSentiment": "Bullish",
        "modelAccuracy": { "train": 0.91, "test": 0.87 }
    },
    "historicalData": [],
    "technicalIndicators": []
}"#;
