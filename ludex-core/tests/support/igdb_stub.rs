use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ludex_core::CatalogConfig;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Default)]
struct StubState {
    games: VecDeque<(u16, String)>,
    token_status: u16,
    token_expires_in: u64,
    tokens_issued: usize,
    seen: Vec<SeenRequest>,
}

/// Minimal HTTP/1.1 server standing in for the Twitch token endpoint and
/// the IGDB `/games` endpoint. Every connection serves one request.
#[derive(Clone)]
pub struct IgdbStub {
    addr: SocketAddr,
    state: Arc<Mutex<StubState>>,
}

impl IgdbStub {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let state = Arc::new(Mutex::new(StubState {
            token_status: 200,
            token_expires_in: 3600,
            ..StubState::default()
        }));

        let shared = Arc::clone(&state);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let shared = Arc::clone(&shared);
                tokio::spawn(async move { serve(stream, shared).await });
            }
        });

        Self { addr, state }
    }

    /// Queue the next `/games` response.
    pub fn games(&self, status: u16, body: &str) -> &Self {
        self.lock().games.push_back((status, body.to_string()));
        self
    }

    pub fn reject_tokens(&self) -> &Self {
        self.lock().token_status = 401;
        self
    }

    pub fn token_lifetime(&self, seconds: u64) -> &Self {
        self.lock().token_expires_in = seconds;
        self
    }

    pub fn tokens_issued(&self) -> usize {
        self.lock().tokens_issued
    }

    pub fn game_requests(&self) -> Vec<SeenRequest> {
        self.lock()
            .seen
            .iter()
            .filter(|req| req.path.ends_with("/games"))
            .cloned()
            .collect()
    }

    /// Catalog settings pointed at this stub, with no request spacing.
    pub fn config(&self) -> CatalogConfig {
        CatalogConfig {
            api_base_url: format!("http://{}/v4", self.addr),
            token_url: format!("http://{}/oauth2/token", self.addr),
            request_interval: Duration::ZERO,
            rate_limit_backoff: Duration::from_millis(300),
            request_timeout: Duration::from_secs(5),
            ..CatalogConfig::default()
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().expect("stub state")
    }
}

async fn serve(mut stream: TcpStream, state: Arc<Mutex<StubState>>) {
    let Some((path, authorization)) = read_request(&mut stream).await else {
        return;
    };

    let (status, body) = {
        let mut state = state.lock().expect("stub state");
        state.seen.push(SeenRequest {
            path: path.clone(),
            authorization,
        });
        if path.ends_with("/oauth2/token") {
            if state.token_status == 200 {
                state.tokens_issued += 1;
                let body = format!(
                    r#"{{"access_token":"tok-{}","expires_in":{},"token_type":"bearer"}}"#,
                    state.tokens_issued, state.token_expires_in
                );
                (200, body)
            } else {
                (state.token_status, r#"{"message":"invalid client"}"#.to_string())
            }
        } else if path.ends_with("/games") {
            state
                .games
                .pop_front()
                .unwrap_or_else(|| (500, "no scripted response".to_string()))
        } else {
            (404, String::new())
        }
    };

    let response = format!(
        "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\n\
         Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

/// Reads one request; returns its path and `Authorization` header.
async fn read_request(stream: &mut TcpStream) -> Option<(String, Option<String>)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let header_end = loop {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..read]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.split("\r\n");
    let path = lines.next()?.split_whitespace().nth(1)?.to_string();

    let mut content_length = 0;
    let mut authorization = None;
    for line in lines {
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        match name.trim().to_ascii_lowercase().as_str() {
            "content-length" => content_length = value.trim().parse().unwrap_or(0),
            "authorization" => authorization = Some(value.trim().to_string()),
            _ => {}
        }
    }

    while buf.len() < header_end + content_length {
        let read = stream.read(&mut chunk).await.ok()?;
        if read == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..read]);
    }

    Some((path, authorization))
}
