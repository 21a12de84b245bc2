//! Mock-based tool tests using wiremock.
//!
//! These tests verify tool behavior end to end against a mocked OpenAlex API.
#![allow(clippy::needless_pass_by_value)]

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openalex_mcp::client::OpenAlexClient;
use openalex_mcp::config::Config;
use openalex_mcp::error::ToolError;
use openalex_mcp::tools::{
    GetBatchWorkDetailsTool, GetCitingWorksTool, GetReferencedWorksTool, GetWorkDetailsTool,
    GetWorkNgramsTool, McpTool, SearchWorksTool, ToolContext,
};

/// Create a test context with a mock server.
fn setup_test_context(mock_server: &MockServer) -> ToolContext {
    let config = Config::for_testing(&mock_server.uri());
    let client = OpenAlexClient::new(&config).unwrap();
    ToolContext::new(Arc::new(client))
}

/// Sample work JSON for mocking.
fn sample_work(id: &str, title: &str) -> Value {
    json!({
        "id": format!("https://openalex.org/{id}"),
        "doi": format!("https://doi.org/10.1234/{}", id.to_lowercase()),
        "title": title,
        "display_name": title,
        "publication_year": 2023,
        "cited_by_count": 42,
        "authorships": [{"author": {"display_name": "Ada Lovelace"}}],
        "primary_location": {"source": {"display_name": "Journal of Tests"}},
        "open_access": {"oa_url": null},
        "referenced_works": [],
        "abstract_inverted_index": {"Neural": [0], "networks": [1], "learn": [2]}
    })
}

/// Sample works list page.
fn sample_page(works: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "meta": {
            "count": 1000,
            "db_response_time_ms": 12,
            "page": null,
            "per_page": works.len(),
            "next_cursor": next_cursor,
            "groups_count": null
        },
        "results": works,
        "group_by": []
    })
}

fn keys(value: &Value) -> Vec<&str> {
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys
}

// =============================================================================
// search_works
// =============================================================================

#[tokio::test]
async fn test_search_works_selects_exact_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("search", "machine learning"))
        .and(query_param("filter", "publication_year:2023"))
        .and(query_param("select", "id,title"))
        .and(query_param("cursor", "*"))
        .and(query_param("per-page", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![
                json!({"id": "https://openalex.org/W1", "title": "One"}),
                json!({"id": "https://openalex.org/W2", "title": "Two"}),
            ],
            Some("IlsxNjA5"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = SearchWorksTool
        .execute(
            &ctx,
            json!({
                "search_query": "machine learning",
                "filters": {"publication_year": 2023},
                "select_fields": ["id", "title"]
            }),
        )
        .await
        .unwrap();

    let results = result["results"].as_array().unwrap();
    assert_eq!(results.len(), 2);
    for work in results {
        assert_eq!(keys(work), vec!["id", "title"]);
    }
    assert_eq!(result["meta"]["next_cursor"], "IlsxNjA5");
    assert_eq!(result["meta"]["count"], 1000);
}

#[tokio::test]
async fn test_search_works_abstract_is_plaintext() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("select", "title,abstract_inverted_index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![json!({
                "title": "Nets",
                "abstract_inverted_index": {"Neural": [0], "learn": [2], "networks": [1]}
            })],
            None,
        )))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = SearchWorksTool
        .execute(&ctx, json!({"search_query": "nets", "select_fields": ["title", "abstract"]}))
        .await
        .unwrap();

    let work = &result["results"][0];
    assert_eq!(work["abstract"], "Neural networks learn");
    assert!(work.get("abstract_inverted_index").is_none());
    assert_eq!(keys(work), vec!["abstract", "title"]);
}

#[tokio::test]
async fn test_search_works_full_objects_drop_inverted_index() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_page(vec![sample_work("W1", "Full")], None)),
        )
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result =
        SearchWorksTool.execute(&ctx, json!({"search_query": "full"})).await.unwrap();

    let work = &result["results"][0];
    assert_eq!(work["abstract"], "Neural networks learn");
    assert!(work.get("abstract_inverted_index").is_none());
    assert_eq!(work["cited_by_count"], 42);
    assert_eq!(result["meta"]["next_cursor"], Value::Null);
}

#[tokio::test]
async fn test_search_works_field_search_sort_and_ranges() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("filter", "title.search:graphene,publication_year:2015-2020,type:article|review"))
        .and(query_param("sort", "cited_by_count:desc"))
        .and(query_param("per-page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(vec![], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = SearchWorksTool
        .execute(
            &ctx,
            json!({
                "search_query": "graphene",
                "search_field": "title",
                "filters": {
                    "publication_year": {"from": 2015, "to": 2020},
                    "type": ["article", "review"]
                },
                "sort": {"cited_by_count": "desc"},
                "per_page": 5
            }),
        )
        .await
        .unwrap();

    assert_eq!(result["results"], json!([]));
    assert_eq!(result["meta"]["per_page"], 0);
}

#[tokio::test]
async fn test_search_works_cursor_round_trip() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![json!({"id": "https://openalex.org/W1"})],
            Some("cursor-page-2"),
        )))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("cursor", "cursor-page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![json!({"id": "https://openalex.org/W2"})],
            None,
        )))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let first = SearchWorksTool
        .execute(&ctx, json!({"search_query": "q", "select_fields": ["id"], "per_page": 1}))
        .await
        .unwrap();
    let next = first["meta"]["next_cursor"].as_str().unwrap().to_string();

    let second = SearchWorksTool
        .execute(
            &ctx,
            json!({"search_query": "q", "select_fields": ["id"], "per_page": 1, "cursor": next}),
        )
        .await
        .unwrap();

    assert_ne!(first["results"][0], second["results"][0]);
    assert_eq!(second["results"][0]["id"], "https://openalex.org/W2");
    assert_eq!(second["meta"]["next_cursor"], Value::Null);
}

#[tokio::test]
async fn test_search_works_summaries() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_page(vec![sample_work("W7", "Summarized")], None)),
        )
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = SearchWorksTool
        .execute(
            &ctx,
            json!({
                "search_query": "q",
                "summarize_results": true,
                "select_fields": ["title", "authors", "venue", "oa_url"]
            }),
        )
        .await
        .unwrap();

    // oa_url is null upstream, so it is dropped from the summary
    assert_eq!(
        result["results"][0],
        json!({"title": "Summarized", "authors": ["Ada Lovelace"], "venue": "Journal of Tests"})
    );
}

// =============================================================================
// get_work_details
// =============================================================================

#[tokio::test]
async fn test_get_work_details_selected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W2741809807"))
        .and(query_param("select", "title,abstract_inverted_index"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "title": "The state of OA",
            "abstract_inverted_index": {"Despite": [0], "growing": [1], "interest": [2]}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = GetWorkDetailsTool
        .execute(
            &ctx,
            json!({"work_id": "W2741809807", "select_fields": ["title", "abstract"]}),
        )
        .await
        .unwrap();

    assert_eq!(result, json!({"title": "The state of OA", "abstract": "Despite growing interest"}));
}

#[tokio::test]
async fn test_get_work_details_accepts_openalex_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_work("W1", "By URL")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = GetWorkDetailsTool
        .execute(&ctx, json!({"work_id": "https://openalex.org/W1"}))
        .await
        .unwrap();

    assert_eq!(result["title"], "By URL");
    assert_eq!(result["abstract"], "Neural networks learn");
}

#[tokio::test]
async fn test_get_work_details_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "404 Not Found",
            "message": "The requested URL was not found on the server."
        })))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let err = GetWorkDetailsTool.execute(&ctx, json!({"work_id": "W999"})).await.unwrap_err();

    assert!(matches!(err, ToolError::NotFound { ref id } if id == "W999"));
}

// =============================================================================
// get_referenced_works
// =============================================================================

#[tokio::test]
async fn test_get_referenced_works() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W10"))
        .and(query_param("select", "referenced_works"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "referenced_works": ["https://openalex.org/W11", "https://openalex.org/W12"]
        })))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = GetReferencedWorksTool.execute(&ctx, json!({"work_id": "W10"})).await.unwrap();

    assert_eq!(
        result,
        json!({"referenced_work_ids": ["https://openalex.org/W11", "https://openalex.org/W12"]})
    );
}

#[tokio::test]
async fn test_get_referenced_works_empty_is_not_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"referenced_works": []})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works/W21"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    for id in ["W20", "W21"] {
        let result = GetReferencedWorksTool.execute(&ctx, json!({"work_id": id})).await.unwrap();
        assert_eq!(result, json!({"referenced_work_ids": []}), "{id}");
    }
}

#[tokio::test]
async fn test_get_referenced_works_unknown_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W404"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let err = GetReferencedWorksTool.execute(&ctx, json!({"work_id": "W404"})).await.unwrap_err();
    assert!(matches!(err, ToolError::NotFound { .. }));
}

// =============================================================================
// get_citing_works
// =============================================================================

#[tokio::test]
async fn test_get_citing_works_filters_by_cites() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("filter", "cites:W2741809807"))
        .and(query_param("select", "id,publication_year"))
        .and(query_param("per-page", "10"))
        .and(query_param("cursor", "*"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![json!({"id": "https://openalex.org/W5", "publication_year": 2024})],
            Some("next-one"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = GetCitingWorksTool
        .execute(
            &ctx,
            json!({
                "work_id": "https://openalex.org/W2741809807",
                "select_fields": ["id", "publication_year"],
                "per_page": 10
            }),
        )
        .await
        .unwrap();

    assert_eq!(result["results"][0], json!({"id": "https://openalex.org/W5", "publication_year": 2024}));
    assert_eq!(result["meta"]["next_cursor"], "next-one");
}

#[tokio::test]
async fn test_get_citing_works_resolves_doi_first() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/doi:10.7717/peerj.4375"))
        .and(query_param("select", "id"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "https://openalex.org/W2741809807"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("filter", "cites:W2741809807"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(vec![], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = GetCitingWorksTool
        .execute(&ctx, json!({"work_id": "10.7717/peerj.4375"}))
        .await
        .unwrap();

    assert_eq!(result["results"], json!([]));
}

#[tokio::test]
async fn test_get_citing_works_unresolvable_doi() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/doi:10.0000/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let err = GetCitingWorksTool
        .execute(&ctx, json!({"work_id": "10.0000/missing"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::NotFound { ref id } if id == "10.0000/missing"));
}

// =============================================================================
// get_work_ngrams
// =============================================================================

#[tokio::test]
async fn test_get_work_ngrams_returns_payload() {
    let mock_server = MockServer::start().await;

    let ngrams = json!({
        "meta": {"count": 1, "doi": "https://doi.org/10.1/x", "openalex_id": "https://openalex.org/W3"},
        "ngrams": [{"ngram": "open access", "ngram_tokens": 2, "ngram_count": 7, "term_frequency": 0.01}]
    });

    Mock::given(method("GET"))
        .and(path("/works/W3/ngrams"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ngrams.clone()))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = GetWorkNgramsTool.execute(&ctx, json!({"work_id": "W3"})).await.unwrap();

    assert_eq!(result, ngrams);
}

#[tokio::test]
async fn test_get_work_ngrams_not_available_for_valid_work() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W4/ngrams"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works/W4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "https://openalex.org/W4"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let err = GetWorkNgramsTool.execute(&ctx, json!({"work_id": "W4"})).await.unwrap_err();

    assert!(matches!(err, ToolError::NotAvailable { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_get_work_ngrams_empty_list_is_not_available() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W5/ngrams"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"meta": {"count": 0}, "ngrams": []})),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works/W5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "https://openalex.org/W5"})))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let err = GetWorkNgramsTool.execute(&ctx, json!({"work_id": "W5"})).await.unwrap_err();

    assert!(matches!(err, ToolError::NotAvailable { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_get_work_ngrams_invalid_id_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works/W0/ngrams"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/works/W0"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let err = GetWorkNgramsTool.execute(&ctx, json!({"work_id": "W0"})).await.unwrap_err();

    assert!(matches!(err, ToolError::NotFound { .. }), "got {err:?}");
}

// =============================================================================
// get_batch_work_details
// =============================================================================

#[tokio::test]
async fn test_batch_work_details_reports_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/works"))
        .and(query_param("filter", "ids.openalex:W1|W2|W3"))
        .and(query_param("select", "id,title"))
        .and(query_param("per-page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_page(
            vec![
                json!({"id": "https://openalex.org/W1", "title": "One"}),
                json!({"id": "https://openalex.org/W3", "title": "Three"}),
            ],
            None,
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = setup_test_context(&mock_server);
    let result = GetBatchWorkDetailsTool
        .execute(
            &ctx,
            json!({
                "work_ids": ["W1", "https://openalex.org/W2", "w3", "W1"],
                "select_fields": ["title"]
            }),
        )
        .await
        .unwrap();

    assert_eq!(result["works"], json!([{"title": "One"}, {"title": "Three"}]));
    assert_eq!(result["not_found"], json!(["W2"]));
}
