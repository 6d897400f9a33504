//! End-to-end command tests with a mock API.

use clap::Parser;
use gemini_cli::cli::{Cli, Commands, GenerateArgs};
use gemini_cli::commands;
use gemini_cli::parts::parse_input_parts;
use gemini_cli::GeminiClient;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::with_http_client("test-key", server.uri(), reqwest::Client::new())
}

fn generate_args(argv: &[&str]) -> GenerateArgs {
    let mut full = vec!["gemini-cli", "generate"];
    full.extend_from_slice(argv);
    match Cli::try_parse_from(full).unwrap().command {
        Commands::Generate(args) => args,
        other => panic!("unexpected command: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_models_reshapes_output() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                {
                    "name": "models/gemini-2.5-pro",
                    "version": "2.5",
                    "displayName": "Gemini 2.5 Pro",
                    "description": "ignored in output",
                    "inputTokenLimit": 100,
                    "outputTokenLimit": 10,
                    "supportedGenerationMethods": ["generateContent"]
                },
                {
                    "name": "models/imagen-3.0-generate-002",
                    "version": "002",
                    "displayName": "Imagen 3",
                    "inputTokenLimit": 480,
                    "outputTokenLimit": 8192,
                    "supportedGenerationMethods": ["generateContent", "predict"]
                },
                {
                    "name": "models/text-embedding-004",
                    "version": "004",
                    "displayName": "Text Embedding 004",
                    "inputTokenLimit": 2048,
                    "outputTokenLimit": 1,
                    "supportedGenerationMethods": ["embedContent"]
                }
            ]
        })))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    commands::list_models(&client_for(&server), &mut out)
        .await
        .unwrap();

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.starts_with("{\n  \"models\": ["));
    let value: serde_json::Value = serde_json::from_str(&printed).unwrap();
    assert_eq!(
        value,
        json!({
            "models": [
                {
                    "name": "models/gemini-2.5-pro",
                    "displayName": "Gemini 2.5 Pro",
                    "version": "2.5",
                    "inputTokenLimit": 100,
                    "outputTokenLimit": 10,
                    "supportedGenerationMethods": ["generateContent"],
                    "supportedForTextOutput": "Yes"
                },
                {
                    "name": "models/imagen-3.0-generate-002",
                    "displayName": "Imagen 3",
                    "version": "002",
                    "inputTokenLimit": 480,
                    "outputTokenLimit": 8192,
                    "supportedGenerationMethods": ["generateContent", "predict"],
                    "supportedForTextOutput": "No (Specialized: Audio/Image/Video/Embedding)"
                },
                {
                    "name": "models/text-embedding-004",
                    "displayName": "Text Embedding 004",
                    "version": "004",
                    "inputTokenLimit": 2048,
                    "outputTokenLimit": 1,
                    "supportedGenerationMethods": ["embedContent"],
                    "supportedForTextOutput": "No"
                }
            ]
        })
    );
}

#[tokio::test]
async fn test_generate_sends_built_request_and_prints_raw_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(body_json(json!({
            "system_instruction": { "parts": [{ "text": "Answer in French." }] },
            "contents": [{
                "parts": [
                    { "text": "Describe" },
                    { "inline_data": { "mime_type": "text/plain", "data": "aGVsbG8=" } }
                ]
            }],
            "tools": [{ "google_search": {} }],
            "safetySettings": [
                { "category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_ONLY_HIGH" }
            ],
            "generationConfig": { "maxOutputTokens": 64, "thinkingConfig": { "thinkingBudget": -1 } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .expect(1)
        .mount(&server)
        .await;

    let args = generate_args(&[
        "--model",
        "gemini-2.5-flash",
        "--system-instruction",
        "Answer in French.",
        "--max-output-tokens",
        "64",
        "--thinking-budget",
        "-1",
        "--tool-google-search",
        "--safety-settings",
        "HARM_CATEGORY_HARASSMENT:BLOCK_ONLY_HIGH",
        "text",
        "Describe",
        "file",
        "data:;base64,aGVsbG8=",
    ]);
    let parts = parse_input_parts(args.parts.as_slice()).unwrap();

    let mut out = Vec::new();
    commands::generate(&client_for(&server), &args, &parts, &mut out)
        .await
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "{\"ok\":true}\n");
}

#[tokio::test]
async fn test_generate_fails_before_network_on_bad_safety_settings() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let args = generate_args(&[
        "--model",
        "gemini-2.5-flash",
        "--safety-settings",
        "BAD_PAIR",
        "text",
        "hi",
    ]);
    let parts = parse_input_parts(args.parts.as_slice()).unwrap();

    let mut out = Vec::new();
    let err = commands::generate(&client_for(&server), &args, &parts, &mut out)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("BAD_PAIR"));
    assert!(out.is_empty());
}
