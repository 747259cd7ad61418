use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

use headlines::{
    Error, HttpSearchClient, ResultsContent, SearchBackend, SearchController, SearchRequest,
};

mod test_helpers {
    use super::*;

    /// Serves `router` on an ephemeral local port and returns its base URL.
    pub async fn spawn_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub fn reply_with(status: StatusCode, body: Value) -> Router {
        Router::new().route(
            "/scrape",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        )
    }

    pub fn reply_with_text(status: StatusCode, body: &'static str) -> Router {
        Router::new().route("/scrape", post(move || async move { (status, body) }))
    }
}

use test_helpers::*;

#[tokio::test]
async fn posts_json_keyword_and_count() {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::new(Mutex::new(Vec::new()));
    let router = Router::new().route(
        "/scrape",
        post({
            let seen = seen.clone();
            move |Json(body): Json<Value>| {
                let seen = seen.clone();
                async move {
                    seen.lock().unwrap().push(body);
                    Json(json!({
                        "results": [{
                            "title": "Rust 2025",
                            "summary": "A year of Rust.",
                            "url": "https://example.org/rust",
                            "source": "example.org",
                            "published_date": "Wed, 15 Jan 2025 08:00:00 GMT"
                        }]
                    }))
                }
            }
        }),
    );
    let base = spawn_server(router).await;
    let client = HttpSearchClient::new(&base).unwrap();
    assert_eq!(client.endpoint().as_str(), format!("{base}/scrape"));

    let response = client.search(&SearchRequest::new("rust")).await.unwrap();
    let results = response.results.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].title.as_deref(), Some("Rust 2025"));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.as_slice(), &[json!({"keyword": "rust", "count": 20})]);
}

#[tokio::test]
async fn ok_without_results_field_is_empty() {
    let base = spawn_server(reply_with(StatusCode::OK, json!({}))).await;
    let client = HttpSearchClient::new(&base).unwrap();
    let response = client.search(&SearchRequest::new("rust")).await.unwrap();
    assert!(response.results.is_none());
}

#[tokio::test]
async fn non_ok_carries_server_message() {
    let cases = [
        (
            StatusCode::TOO_MANY_REQUESTS,
            json!({"message": "rate limited"}),
            Some("rate limited"),
        ),
        (
            StatusCode::BAD_REQUEST,
            json!({"error": "Keyword or URL is required"}),
            Some("Keyword or URL is required"),
        ),
        (
            StatusCode::NOT_FOUND,
            json!({"message": "No articles found."}),
            Some("No articles found."),
        ),
        (StatusCode::INTERNAL_SERVER_ERROR, json!({"detail": "x"}), None),
    ];

    for (status, body, expected) in cases {
        let base = spawn_server(reply_with(status, body)).await;
        let client = HttpSearchClient::new(&base).unwrap();
        match client.search(&SearchRequest::new("rust")).await {
            Err(Error::Rejected {
                status: got,
                message,
            }) => {
                assert_eq!(got, status.as_u16());
                assert_eq!(message.as_deref(), expected);
            }
            other => panic!("expected rejection for {status}, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn non_ok_with_non_json_body_is_still_a_rejection() {
    let router = reply_with_text(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
    let base = spawn_server(router).await;
    let client = HttpSearchClient::new(&base).unwrap();
    let err = client.search(&SearchRequest::new("rust")).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Rejected {
            status: 502,
            message: None
        }
    ));
}

#[tokio::test]
async fn ok_with_malformed_body_is_a_decode_error() {
    let base = spawn_server(reply_with_text(StatusCode::OK, "definitely not json")).await;
    let client = HttpSearchClient::new(&base).unwrap();
    let err = client.search(&SearchRequest::new("rust")).await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HttpSearchClient::new(&format!("http://{addr}")).unwrap();
    let err = client.search(&SearchRequest::new("rust")).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
}

#[tokio::test]
async fn controller_over_http_end_to_end() {
    let router = Router::new().route(
        "/scrape",
        post(|Json(body): Json<Value>| async move {
            if body["keyword"] == "limit" {
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(json!({"message": "rate limited"})),
                );
            }
            (
                StatusCode::OK,
                Json(json!({
                    "results": [
                        {"title": "old", "source": "bbc.com", "published_date": "2023-01-01"},
                        {"title": "undated", "source": "example.org"},
                        {
                            "title": "new",
                            "source": "cnn.com",
                            "published_date": "2025-03-01T10:00:00Z"
                        }
                    ]
                })),
            )
        }),
    );
    let base = spawn_server(router).await;
    let controller = SearchController::new(Arc::new(HttpSearchClient::new(&base).unwrap()));

    controller.submit_search("rust").await.unwrap();
    let view = controller.view();
    assert!(!view.loading);
    match view.content {
        ResultsContent::Cards(cards) => {
            let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
            assert_eq!(titles, vec!["new", "old", "undated"]);
            assert_eq!(cards[2].source_label, "Example");
            assert_eq!(cards[2].summary, "No summary available");
            assert_eq!(cards[2].link, "#");
        }
        other => panic!("expected cards, got {other:?}"),
    }

    controller.submit_search("limit").await.unwrap();
    assert_eq!(
        controller.view().content,
        ResultsContent::Error("rate limited".to_string())
    );
}
