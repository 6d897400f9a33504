//! Fetching `http(s)://` file parts.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use gemini_cli::parts::{process_file_argument, resolve_part, ParsedPart, PartError};
use gemini_cli::GeminiCliError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_extension_beats_content_type() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/cat.png",
        ResponseTemplate::new(200).set_body_raw(b"bytes".to_vec(), "image/jpeg"),
    )
    .await;

    let http = reqwest::Client::new();
    let (mime, data) = process_file_argument(&http, &format!("{}/cat.png", server.uri()))
        .await
        .unwrap();
    assert_eq!(mime, "image/png");
    assert_eq!(data, STANDARD.encode(b"bytes"));
}

#[tokio::test]
async fn test_content_type_used_without_extension() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/download",
        ResponseTemplate::new(200).set_body_raw(b"\x00\x01".to_vec(), "image/webp; q=1"),
    )
    .await;

    let http = reqwest::Client::new();
    let (mime, _) = process_file_argument(&http, &format!("{}/download", server.uri()))
        .await
        .unwrap();
    assert_eq!(mime, "image/webp");
}

#[tokio::test]
async fn test_generic_content_type_falls_back_to_sniffing() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/blob",
        ResponseTemplate::new(200)
            .set_body_raw(b"%PDF-1.7 rest".to_vec(), "application/octet-stream"),
    )
    .await;

    let http = reqwest::Client::new();
    let (mime, _) = process_file_argument(&http, &format!("{}/blob", server.uri()))
        .await
        .unwrap();
    assert_eq!(mime, "application/pdf");
}

#[tokio::test]
async fn test_non_success_status_fails_with_argument() {
    let server = MockServer::start().await;
    serve(&server, "/missing.jpg", ResponseTemplate::new(404)).await;

    let http = reqwest::Client::new();
    let url = format!("{}/missing.jpg", server.uri());
    let err = resolve_part(&http, &ParsedPart::file(url.clone()))
        .await
        .unwrap_err();

    match err {
        GeminiCliError::PartResolution { argument, source } => {
            assert_eq!(argument, url);
            assert!(matches!(source, PartError::FetchStatus { .. }));
            assert!(source.to_string().contains("404"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
