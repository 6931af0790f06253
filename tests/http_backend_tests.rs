//! Wire tests for the HTTP backend
//!
//! Runs `HttpBackend` against a one-request-per-connection listener and checks
//! what actually goes over the socket

use finbot::client::{ChatBackend, HttpBackend};
use finbot::config::WidgetConfig;
use finbot::error::ClientError;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

#[derive(Clone, Debug)]
struct Recorded {
    method: String,
    path: String,
    headers: HashMap<String, String>,
    body: String,
}

impl Recorded {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

struct Reply {
    status: u16,
    body: &'static str,
    set_cookie: Option<&'static str>,
    delay: Option<Duration>,
}

impl Reply {
    fn json(status: u16, body: &'static str) -> Self {
        Self {
            status,
            body,
            set_cookie: None,
            delay: None,
        }
    }

    fn with_cookie(mut self, cookie: &'static str) -> Self {
        self.set_cookie = Some(cookie);
        self
    }

    fn after(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Serves the scripted replies in order, one connection each.
struct StubServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl StubServer {
    async fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = requests.clone();
        tokio::spawn(async move {
            for reply in replies {
                let Ok((mut stream, _)) = listener.accept().await else {
                    return;
                };
                let request = read_request(&mut stream).await;
                log.lock().expect("request log").push(request);
                if let Some(delay) = reply.delay {
                    tokio::time::sleep(delay).await;
                }
                write_reply(&mut stream, &reply).await;
            }
        });
        Self { addr, requests }
    }

    fn config(&self) -> WidgetConfig {
        WidgetConfig {
            server_url: format!("http://{}", self.addr),
            ..WidgetConfig::default()
        }
    }

    fn backend(&self) -> HttpBackend {
        HttpBackend::new(self.config()).expect("client")
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("request log").clone()
    }
}

async fn read_request(stream: &mut TcpStream) -> Recorded {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).await.expect("read head");
        assert!(n > 0, "connection closed before the headers ended");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut lines = head.split("\r\n");
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let path = request_line.next().unwrap_or_default().to_string();
    let headers: HashMap<String, String> = lines
        .filter_map(|line| line.split_once(':'))
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim().to_string()))
        .collect();

    let len: usize = headers
        .get("content-length")
        .and_then(|value| value.parse().ok())
        .unwrap_or(0);
    while buf.len() < head_end + len {
        let n = stream.read(&mut chunk).await.expect("read body");
        assert!(n > 0, "connection closed before the body ended");
        buf.extend_from_slice(&chunk[..n]);
    }
    let body = String::from_utf8_lossy(&buf[head_end..head_end + len]).into_owned();

    Recorded {
        method,
        path,
        headers,
        body,
    }
}

async fn write_reply(stream: &mut TcpStream, reply: &Reply) {
    let reason = match reply.status {
        200 => "OK",
        500 => "Internal Server Error",
        _ => "Other",
    };
    let mut response = format!(
        "HTTP/1.1 {} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
        reply.status,
        reply.body.len()
    );
    if let Some(cookie) = reply.set_cookie {
        response.push_str(&format!("Set-Cookie: {cookie}\r\n"));
    }
    response.push_str("\r\n");
    response.push_str(reply.body);
    // The client may already have hung up after a timeout.
    let _ = stream.write_all(response.as_bytes()).await;
    let _ = stream.shutdown().await;
}

mod request_shape_tests {
    use super::*;

    #[tokio::test]
    async fn test_chat_posts_json_message() {
        let server = StubServer::start(vec![Reply::json(
            200,
            r#"{"response":"Diversify.","doc_count":2}"#,
        )])
        .await;

        let reply = server
            .backend()
            .chat("How should I invest?")
            .await
            .expect("chat reply");
        assert_eq!(reply.response, "Diversify.");
        assert_eq!(reply.doc_count, Some(2));

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        let chat = &requests[0];
        assert_eq!(chat.method, "POST");
        assert_eq!(chat.path, "/chat");
        assert_eq!(chat.header("content-type"), Some("application/json"));
        let body: serde_json::Value = serde_json::from_str(&chat.body).expect("json body");
        assert_eq!(body, serde_json::json!({ "message": "How should I invest?" }));
    }

    #[tokio::test]
    async fn test_clear_and_reload_post_without_body() {
        let server = StubServer::start(vec![
            Reply::json(200, r#"{"status":"success"}"#),
            Reply::json(
                200,
                r#"{"status":"success","doc_count":2,"doc_names":["a.pdf","b.txt"]}"#,
            ),
        ])
        .await;
        let backend = server.backend();

        backend.clear().await.expect("clear");
        let listing = backend.reload().await.expect("reload");
        assert_eq!(listing.count, 2);
        assert_eq!(listing.names, vec!["a.pdf", "b.txt"]);

        let requests = server.requests();
        let paths: Vec<&str> = requests.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/clear", "/reload"]);
        for request in &requests {
            assert_eq!(request.method, "POST");
            assert_eq!(request.header("content-type"), Some("application/json"));
            assert!(request.body.is_empty(), "{} sent a body", request.path);
        }
    }

    #[tokio::test]
    async fn test_health_is_a_get() {
        let server = StubServer::start(vec![Reply::json(200, r#"{"status":"ok"}"#)]).await;

        assert!(server.backend().health().await.expect("health"));

        let requests = server.requests();
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/health");
        assert!(requests[0].body.is_empty());
    }

    #[tokio::test]
    async fn test_server_url_path_prefix_is_kept() {
        let server = StubServer::start(vec![Reply::json(200, r#"{"status":"ok"}"#)]).await;
        let config = WidgetConfig {
            server_url: format!("http://{}/finbot", server.addr),
            ..WidgetConfig::default()
        };

        let backend = HttpBackend::new(config).expect("client");
        backend.health().await.expect("health");

        assert_eq!(server.requests()[0].path, "/finbot/health");
    }
}

mod failure_tests {
    use super::*;

    #[tokio::test]
    async fn test_error_status_is_reported_before_decoding() {
        let server = StubServer::start(vec![
            Reply::json(500, r#"{"response":"should not be shown"}"#),
            Reply::json(500, r#"{"error":"boom"}"#),
        ])
        .await;
        let backend = server.backend();

        let chat = backend.chat("hi").await.expect_err("chat should fail");
        assert!(matches!(chat, ClientError::Status(500)));
        let clear = backend.clear().await.expect_err("clear should fail");
        assert!(matches!(clear, ClientError::Status(500)));
    }

    #[tokio::test]
    async fn test_non_json_body_is_a_decode_error() {
        let server = StubServer::start(vec![Reply::json(200, "<html>busy</html>")]).await;

        let err = server.backend().reload().await.expect_err("reload should fail");
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[tokio::test]
    async fn test_request_timeout_is_a_transport_error() {
        let server = StubServer::start(vec![
            Reply::json(200, r#"{"response":"late"}"#).after(Duration::from_secs(2)),
        ])
        .await;
        let config = WidgetConfig {
            request_timeout: Some(Duration::from_millis(200)),
            ..server.config()
        };

        let backend = HttpBackend::new(config).expect("client");
        let err = backend.chat("hi").await.expect_err("should time out");
        match err {
            ClientError::Transport(inner) => assert!(inner.is_timeout()),
            other => panic!("expected a transport timeout, got {other:?}"),
        }
    }
}

mod session_tests {
    use super::*;

    #[tokio::test]
    async fn test_session_cookie_from_chat_is_sent_on_clear() {
        let server = StubServer::start(vec![
            Reply::json(200, r#"{"response":"Noted."}"#).with_cookie("session=abc123; Path=/"),
            Reply::json(200, r#"{"status":"success"}"#),
        ])
        .await;
        let backend = server.backend();

        backend.chat("remember me").await.expect("chat");
        backend.clear().await.expect("clear");

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].header("cookie"), None);
        assert_eq!(requests[1].path, "/clear");
        assert_eq!(requests[1].header("cookie"), Some("session=abc123"));
    }
}
