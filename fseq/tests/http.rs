//! Upload server routes, driven in-process without a socket.

#![cfg(feature = "http")]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
};
use fseq::http_backend::router;
use fseq::response::md5_hex;
use fseq::{ControllerLimits, SequenceBuilder, ValidatorConfig};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "fseq-test-boundary";

struct Part<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    data: &'a [u8],
}

fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match part.file_name {
            Some(file_name) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                part.name
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/validate")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn file_part(data: &[u8]) -> Part<'_> {
    Part {
        name: "fesq",
        file_name: Some("show.fseq"),
        data,
    }
}

const JSON_PART: Part<'static> = Part {
    name: "json",
    file_name: None,
    data: b"1",
};

async fn send(config: &ValidatorConfig, request: Request<Body>) -> Response {
    router(config).oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn blank_show() -> Vec<u8> {
    SequenceBuilder::new()
        .data_offset(24)
        .step_time_ms(15)
        .frame(&[0; 30], &[0; 16])
        .build()
}

#[tokio::test]
async fn valid_upload_as_json() {
    let bytes = blank_show();
    let request = upload_request(&[file_part(&bytes), JSON_PART]);
    let response = send(&ValidatorConfig::default(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["valid"], true);
    assert_eq!(json["file"]["name"], "show.fseq");
    assert_eq!(json["file"]["size"], bytes.len());
    assert_eq!(json["file"]["md5"], md5_hex(&bytes));
    assert_eq!(json["validation"]["frameCount"], 1);
    assert_eq!(json["validation"]["durationSecs"], 0.015);
    assert_eq!(json["validation"]["commandCount"], 4);
    assert_eq!(json["validation"]["memoryUsageRatio"], 4.0 / 681.0);
}

#[tokio::test]
async fn rejected_upload_as_json() {
    let bytes = SequenceBuilder::new()
        .channel_count(50)
        .frame(&[0; 30], &[0; 16])
        .build();
    let request = upload_request(&[JSON_PART, file_part(&bytes)]);
    let response = send(&ValidatorConfig::default(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["valid"], false);
    assert_eq!(json["error"], "Expected 48 channels, got 50");
    assert_eq!(json["errorKind"], "ChannelCountError");
    assert!(json.get("validation").is_none());
}

#[tokio::test]
async fn upload_without_json_field_is_html() {
    let bytes = blank_show();
    let response = send(&ValidatorConfig::default(), upload_request(&[file_part(&bytes)])).await;

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
    let html = body_text(response).await;
    assert!(html.contains("show.fseq is valid"));
    assert!(html.contains("Commands: 4"));
}

#[tokio::test]
async fn missing_upload() {
    let response = send(&ValidatorConfig::default(), upload_request(&[JSON_PART])).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        serde_json::json!({"status": false, "message": "No file uploaded"})
    );
}

#[tokio::test]
async fn configured_limits_apply() {
    let config = ValidatorConfig {
        limits: ControllerLimits::new().with_command_capacity(3),
        ..ValidatorConfig::default()
    };
    let bytes = blank_show();
    let response = send(&config, upload_request(&[file_part(&bytes), JSON_PART])).await;

    let json = body_json(response).await;
    assert_eq!(json["valid"], false);
    assert_eq!(
        json["error"],
        "Sequence uses 4 commands. The maximum allowed is 3 (133.33% of memory)"
    );
    assert_eq!(json["errorKind"], "MemoryLimitError");
}

#[tokio::test]
async fn health() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = send(&ValidatorConfig::default(), request).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
