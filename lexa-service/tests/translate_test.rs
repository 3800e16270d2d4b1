mod common;

use axum::http::StatusCode;
use common::{app, body_json, post_json, strict_app};
use lexa_service::services::providers::mock::MockTextProvider;
use lexa_service::services::providers::ProviderError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tower::util::ServiceExt;

#[tokio::test]
async fn legal_to_xml_returns_generated_xml() {
    let provider = Arc::new(MockTextProvider::always("<section>...</section>"));

    let response = app(provider.clone())
        .oneshot(post_json(
            "/translate",
            json!({"text": "Section 1. Definitions.", "direction": "legal_to_xml"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"result": "<section>...</section>"})
    );
    assert_eq!(provider.calls(), 1);

    let prompts = provider.prompts().await;
    assert!(prompts[0].contains("Section 1. Definitions."));
    assert!(prompts[0].contains("structured XML format"));
}

#[tokio::test]
async fn xml_to_legal_uses_reverse_prompt() {
    let provider = Arc::new(MockTextProvider::always("Section 1. Definitions."));

    let response = app(provider.clone())
        .oneshot(post_json(
            "/translate",
            json!({"text": "<section num=\"1\"/>", "direction": "xml_to_legal"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["result"], "Section 1. Definitions.");
    assert!(provider.prompts().await[0].starts_with("Convert this XML to natural legal language"));
}

#[tokio::test]
async fn blank_text_is_rejected_for_every_direction() {
    for direction in ["legal_to_xml", "xml_to_legal", "sideways"] {
        for text in ["", "   ", "\n\t"] {
            let provider = Arc::new(MockTextProvider::always("unused"));

            let response = app(provider.clone())
                .oneshot(post_json(
                    "/translate",
                    json!({"text": text, "direction": direction}),
                ))
                .await
                .unwrap();

            assert_eq!(
                response.status(),
                StatusCode::BAD_REQUEST,
                "text {text:?} direction {direction}"
            );
            assert_eq!(provider.calls(), 0);
        }
    }
}

#[tokio::test]
async fn unknown_direction_is_rejected() {
    let provider = Arc::new(MockTextProvider::always("unused"));

    let response = app(provider.clone())
        .oneshot(post_json(
            "/translate",
            json!({"text": "Section 1.", "direction": "law-to-xml"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Use 'legal_to_xml' or 'xml_to_legal'"));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn missing_direction_is_rejected() {
    let provider = Arc::new(MockTextProvider::always("unused"));

    let response = app(provider)
        .oneshot(post_json("/translate", json!({"text": "Section 1."})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn exhausted_transport_retries_return_500() {
    let provider = Arc::new(MockTextProvider::failing(ProviderError::Network(
        "connection refused".into(),
    )));
    let start = Instant::now();

    let response = app(provider.clone())
        .oneshot(post_json(
            "/translate",
            json!({"text": "Section 1.", "direction": "legal_to_xml"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(provider.calls(), 3);
    assert_eq!(start.elapsed(), Duration::from_secs(15));

    let body = body_json(response).await;
    assert_eq!(
        body["details"],
        "Translation failed: Network error: connection refused"
    );
}

#[tokio::test(start_paused = true)]
async fn recovers_on_second_attempt() {
    let provider = Arc::new(MockTextProvider::scripted(
        vec![
            Err(ProviderError::Network("timeout".into())),
            Ok("<section>retried</section>".into()),
        ],
        Ok("unused".into()),
    ));
    let start = Instant::now();

    let response = app(provider.clone())
        .oneshot(post_json(
            "/translate",
            json!({"text": "Section 1.", "direction": "legal_to_xml"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["result"], "<section>retried</section>");
    assert_eq!(provider.calls(), 2);
    assert_eq!(start.elapsed(), Duration::from_secs(5));
}

#[tokio::test]
async fn provider_error_is_returned_as_result_text() {
    let provider = Arc::new(MockTextProvider::failing(ProviderError::RateLimited));

    let response = app(provider.clone())
        .oneshot(post_json(
            "/translate",
            json!({"text": "Section 1.", "direction": "legal_to_xml"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["result"],
        "Error calling Gemini API: Rate limited"
    );
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn strict_mode_reports_provider_error_as_bad_gateway() {
    let provider = Arc::new(MockTextProvider::failing(ProviderError::ContentFiltered));

    let response = strict_app(provider.clone())
        .oneshot(post_json(
            "/translate",
            json!({"text": "Section 1.", "direction": "legal_to_xml"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(provider.calls(), 1);
}
