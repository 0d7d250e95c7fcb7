use base64::{engine::general_purpose, Engine as _};
use lsb_stego_web::common::config::ServiceConfig;
use lsb_stego_web::processing::{decode_message, CARRIER_START};
use lsb_stego_web::server::{build_router, AppState};
use std::net::SocketAddr;
use std::path::Path;
use tempfile::tempdir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const BOUNDARY: &str = "stego-test-boundary-7MA4YWxkTrZu0gW";

struct Part<'a> {
    name: &'a str,
    filename: Option<&'a str>,
    data: &'a [u8],
}

fn image_part(data: &[u8]) -> Part<'_> {
    Part {
        name: "image",
        filename: Some("cover.bmp"),
        data,
    }
}

fn message_part(message: &str) -> Part<'_> {
    Part {
        name: "message",
        filename: None,
        data: message.as_bytes(),
    }
}

fn multipart_body(parts: &[Part]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    part.name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name).as_bytes(),
            ),
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

/// A cover image whose bytes never spell out the boundary.
fn cover_image(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

fn test_config(static_dir: &Path) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.server.address = "127.0.0.1:0".to_string();
    config.web.static_dir = static_dir.to_path_buf();
    config
}

async fn spawn_app(config: ServiceConfig) -> SocketAddr {
    let app = build_router(AppState::new(config));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Send one HTTP/1.1 request and return (status, body).
async fn send(addr: SocketAddr, method: &str, path: &str, body: Option<Vec<u8>>) -> (u16, Vec<u8>) {
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let mut request = format!(
        "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n",
        method, path, addr
    );
    if let Some(body) = &body {
        request.push_str(&format!(
            "Content-Type: multipart/form-data; boundary={}\r\nContent-Length: {}\r\n",
            BOUNDARY,
            body.len()
        ));
    }
    request.push_str("\r\n");

    stream.write_all(request.as_bytes()).await.unwrap();
    if let Some(body) = &body {
        stream.write_all(body).await.unwrap();
    }
    stream.flush().await.unwrap();

    let mut response = Vec::new();
    stream.read_to_end(&mut response).await.unwrap();

    let split = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8_lossy(&response[..split]).to_string();
    let status = head
        .split_whitespace()
        .nth(1)
        .and_then(|code| code.parse().ok())
        .expect("response has no status code");

    (status, response[split + 4..].to_vec())
}

async fn post_form(addr: SocketAddr, path: &str, parts: &[Part<'_>]) -> (u16, Vec<u8>) {
    send(addr, "POST", path, Some(multipart_body(parts))).await
}

#[tokio::test]
async fn test_encode_then_decode_over_http() {
    let dir = tempdir().unwrap();
    let addr = spawn_app(test_config(dir.path())).await;
    let message = "Meet me at the old mill at 9";
    let cover = cover_image(1024);

    let (status, body) =
        post_form(addr, "/encode", &[image_part(&cover), message_part(message)]).await;
    assert_eq!(status, 200);

    let encoded = general_purpose::STANDARD.decode(&body).unwrap();
    assert_eq!(encoded.len(), cover.len());
    assert_eq!(&encoded[..CARRIER_START], &cover[..CARRIER_START]);
    assert_eq!(decode_message(&encoded), message);

    let (status, body) = post_form(addr, "/decode", &[image_part(&encoded)]).await;
    assert_eq!(status, 200);
    assert_eq!(String::from_utf8(body).unwrap(), message);
}

#[tokio::test]
async fn test_encode_without_message_embeds_empty_message() {
    let dir = tempdir().unwrap();
    let addr = spawn_app(test_config(dir.path())).await;
    let cover = vec![0xFF; 200];

    let (status, body) = post_form(addr, "/encode", &[image_part(&cover)]).await;
    assert_eq!(status, 200);

    let encoded = general_purpose::STANDARD.decode(&body).unwrap();
    assert!(encoded[55..63].iter().all(|&b| b == 0xFE));
    assert_eq!(decode_message(&encoded), "");
}

#[tokio::test]
async fn test_missing_image_is_not_found() {
    let dir = tempdir().unwrap();
    let addr = spawn_app(test_config(dir.path())).await;

    let (status, body) = post_form(addr, "/encode", &[message_part("hello")]).await;
    assert_eq!(status, 404);
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("image"));

    let (status, _) = post_form(addr, "/decode", &[message_part("ignored")]).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn test_message_too_large_is_bad_request() {
    let dir = tempdir().unwrap();
    let addr = spawn_app(test_config(dir.path())).await;
    let cover = cover_image(80);

    let (status, body) = post_form(
        addr,
        "/encode",
        &[image_part(&cover), message_part("far too long for this image")],
    )
    .await;

    assert_eq!(status, 400);
    let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(error["error"].as_str().unwrap().contains("not large enough"));
}

#[tokio::test]
async fn test_decode_short_image_returns_empty_body() {
    let dir = tempdir().unwrap();
    let addr = spawn_app(test_config(dir.path())).await;

    let (status, body) = post_form(addr, "/decode", &[image_part(&[0xFF; 40])]).await;
    assert_eq!(status, 200);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_health_reports_counters() {
    let dir = tempdir().unwrap();
    let addr = spawn_app(test_config(dir.path())).await;

    post_form(addr, "/decode", &[image_part(&cover_image(128))]).await;
    post_form(addr, "/encode", &[image_part(&cover_image(60)), message_part("nope")]).await;

    let (status, body) = send(addr, "GET", "/api/health", None).await;
    assert_eq!(status, 200);

    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["metrics"]["total_requests"], 2);
    assert_eq!(health["metrics"]["decode_requests"], 1);
    assert_eq!(health["metrics"]["encode_requests"], 1);
    assert_eq!(health["metrics"]["successful_requests"], 1);
    assert_eq!(health["metrics"]["failed_requests"], 1);
}

#[tokio::test]
async fn test_index_page_is_served() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<form id=\"encode-form\"></form>").unwrap();
    std::fs::write(dir.path().join("style.css"), "body { margin: 0; }").unwrap();
    let addr = spawn_app(test_config(dir.path())).await;

    let (status, body) = send(addr, "GET", "/", None).await;
    assert_eq!(status, 200);
    assert!(String::from_utf8_lossy(&body).contains("encode-form"));

    let (status, body) = send(addr, "GET", "/style.css", None).await;
    assert_eq!(status, 200);
    assert!(String::from_utf8_lossy(&body).contains("margin"));
}
