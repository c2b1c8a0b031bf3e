//! Signal producer integration tests against a mock server.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cine_signals::{
    GeminiClient, GeminiConfig, ImagePayload, ReverseImageClient, ReverseImageConfig,
    VisionClient, VisionConfig,
};

fn payload() -> ImagePayload {
    ImagePayload::from_bytes(b"fakejpegdata", "image/jpeg").unwrap()
}

fn gemini_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "parts": [{ "text": text }] }
        }]
    })
}

#[tokio::test]
async fn suggest_movies_returns_raw_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body(
            "1. Inception (2010) - 92% - dream heist\n2. Tenet (2020) - 75% - inverted time",
        )))
        .mount(&server)
        .await;

    let client = GeminiClient::new(GeminiConfig::new("k").with_base_url(server.uri()));
    let text = client.suggest_movies("mind-bending heist").await.unwrap();
    assert!(text.contains("Inception (2010) - 92%"));
}

#[tokio::test]
async fn gemini_falls_back_to_next_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash-lite:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("1. Heat (1995) - 80% - LA crime saga")))
        .mount(&server)
        .await;

    let client = GeminiClient::new(GeminiConfig::new("k").with_base_url(server.uri()));
    let text = client.suggest_movies("heist").await.unwrap();
    assert!(text.contains("Heat"));
}

#[tokio::test]
async fn identify_image_cleans_title() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("\"Inception\" (2010)")))
        .mount(&server)
        .await;

    let client = GeminiClient::new(GeminiConfig::new("k").with_base_url(server.uri()));
    let title = client.identify_image(&payload()).await.unwrap();
    assert_eq!(title.as_deref(), Some("Inception"));
}

#[tokio::test]
async fn identify_image_unknown_is_none_not_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body("unknown")))
        .mount(&server)
        .await;

    let client = GeminiClient::new(GeminiConfig::new("k").with_base_url(server.uri()));
    let title = client.identify_image(&payload()).await.unwrap();
    assert_eq!(title, None);
}

#[tokio::test]
async fn reverse_image_search_returns_items() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(query_param("searchType", "image"))
        .and(query_param("cx", "engine-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                { "title": "\"Inception\" screenshot", "snippet": "rotating hallway", "link": "https://example.com/a" },
                { "title": "Inception (2010) still" }
            ]
        })))
        .mount(&server)
        .await;

    let client =
        ReverseImageClient::new(ReverseImageConfig::new("k", "engine-id").with_base_url(server.uri()));
    let items = client.search(&payload()).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].snippet.as_deref(), Some("rotating hallway"));
    assert_eq!(items[1].link, None);
}

#[tokio::test]
async fn vision_annotations_parse_all_sources() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/images:annotate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "responses": [{
                "webDetection": {
                    "bestGuessLabels": [{ "label": "inception movie poster" }],
                    "webEntities": [
                        { "description": "Inception film", "score": 1.2 },
                        { "description": "Leonardo DiCaprio", "score": 0.8 }
                    ]
                },
                "textAnnotations": [{ "description": "INCEPTION" }]
            }]
        })))
        .mount(&server)
        .await;

    let client = VisionClient::new(VisionConfig::new("k").with_base_url(server.uri()));
    let annotations = client.annotate(&payload()).await.unwrap();
    assert_eq!(annotations.best_guess_labels, vec!["inception movie poster"]);
    assert_eq!(annotations.web_entities.len(), 2);
    assert_eq!(annotations.text_annotations, vec!["INCEPTION"]);
}
