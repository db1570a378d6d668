use doccheck_core::review::{ReviewError, ReviewPrompt, ReviewProvider, ReviewRequest};
use doccheck_core::reviewers::OpenAiCompatibleProvider;
use httpmock::prelude::*;

fn mk_request() -> ReviewRequest {
    ReviewRequest {
        checker: "completeness".to_string(),
        prompt: ReviewPrompt {
            system: Some("judge the completeness dimension".to_string()),
            user: "Document:\n# Cisco".to_string(),
        },
    }
}

fn mk_provider(base_url: String) -> OpenAiCompatibleProvider {
    OpenAiCompatibleProvider::with_client(
        "oa-test".to_string(),
        base_url,
        "sk-test".to_string(),
        "review-model".to_string(),
        reqwest::Client::new(),
    )
}

#[tokio::test]
async fn chat_completion_content_is_returned_raw() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/chat/completions")
            .header("authorization", "Bearer sk-test")
            .json_body_partial(r#"{"model": "review-model"}"#);
        then.status(200).json_body(serde_json::json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "{\"valid\": true, \"score\": 88}"
                }
            }]
        }));
    });

    let provider = mk_provider(server.base_url());
    let res = provider.generate(mk_request()).await.unwrap();
    mock.assert();
    assert_eq!(res.model, "review-model");
    assert_eq!(res.raw_output, "{\"valid\": true, \"score\": 88}");
}

#[tokio::test]
async fn rate_limiting_maps_to_its_own_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(429).body("slow down");
    });

    let provider = mk_provider(server.base_url());
    let err = provider.generate(mk_request()).await.unwrap_err();
    assert!(matches!(err, ReviewError::RateLimited));
}

#[tokio::test]
async fn server_errors_are_invalid_responses() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(500).body("boom");
    });

    let provider = mk_provider(server.base_url());
    let err = provider.generate(mk_request()).await.unwrap_err();
    assert!(matches!(err, ReviewError::InvalidResponse));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // port 1 is never listening
    let provider = mk_provider("http://127.0.0.1:1".to_string());
    let err = provider.generate(mk_request()).await.unwrap_err();
    assert!(matches!(err, ReviewError::Transport));
}

#[tokio::test]
async fn providers_report_healthy_by_default() {
    let provider = mk_provider("http://127.0.0.1:1".to_string());
    provider.health_check().await.unwrap();
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/chat/completions");
        then.status(200).json_body(serde_json::json!({
            "choices": [{"message": {"content": "{}"}}]
        }));
    });

    let provider = mk_provider(format!("{}/", server.base_url()));
    provider.generate(mk_request()).await.unwrap();
    mock.assert();
}
