mod common;

use article_client::{ArticleClient, ListOptions};
use common::{article, MockResponse, MockService, TEST_API_KEY};
use newsfeed_core::{ArticleError, CoreError, ErrorExt, ServiceConfig};
use serde_json::json;

#[tokio::test]
async fn test_list_articles_builds_paginated_query() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::json(json!([
            article(42, "Čudan Šešir", "sport", "2024-05-02"),
            article(41, "Đakovo 2024!", "sport", "2024-05-01"),
        ])))
        .await;

    let client = ArticleClient::new(service.config()).unwrap();
    let options = ListOptions::default()
        .with_category("sport")
        .with_limit(2)
        .with_page(2);
    let articles = client.list_articles(&options).await.unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].slug, "cudan-sesir-42");
    assert_eq!(articles[1].slug, "djakovo-2024-41");
    assert!(articles.iter().all(|a| !a.slug.is_empty()));
    assert_eq!(
        articles[0].extra.get("image_url"),
        Some(&json!("https://cdn.example.com/42.jpg"))
    );

    let requests = service.captured_requests().await;
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(
        request.query_pairs(),
        vec![
            ("select".to_string(), "*".to_string()),
            ("category_name".to_string(), "eq.sport".to_string()),
            ("order".to_string(), "date_unparsed.desc".to_string()),
            ("limit".to_string(), "2".to_string()),
            ("offset".to_string(), "2".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_category_with_spaces_is_sent_percent_encoded() {
    let service = MockService::start().await;
    let client = ArticleClient::new(service.config()).unwrap();

    let options = ListOptions::default().with_category("zdravlje i ljepota");
    client.list_articles(&options).await.unwrap();

    let requests = service.captured_requests().await;
    assert_eq!(
        requests[0].query,
        "select=*&category_name=eq.zdravlje%20i%20ljepota&order=date_unparsed.desc&limit=12&offset=0"
    );
    assert_eq!(
        requests[0].param("category_name").as_deref(),
        Some("eq.zdravlje i ljepota")
    );
}

#[tokio::test]
async fn test_requests_carry_static_credentials() {
    let service = MockService::start().await;
    let client = ArticleClient::new(service.config()).unwrap();

    client.list_latest(4).await.unwrap();

    let requests = service.captured_requests().await;
    assert_eq!(requests[0].header("apikey"), Some(TEST_API_KEY));
    assert_eq!(
        requests[0].header("authorization"),
        Some(format!("Bearer {}", TEST_API_KEY).as_str())
    );
}

#[tokio::test]
async fn test_list_articles_defaults_without_category() {
    let service = MockService::start().await;
    let client = ArticleClient::new(service.config()).unwrap();

    let articles = client
        .list_articles(&ListOptions::default().with_category(""))
        .await
        .unwrap();
    assert!(articles.is_empty());

    let request = &service.captured_requests().await[0];
    assert_eq!(request.param("category_name"), None);
    assert_eq!(request.param("limit").as_deref(), Some("12"));
    assert_eq!(request.param("offset").as_deref(), Some("0"));
}

#[tokio::test]
async fn test_list_articles_non_success_is_fetch_failed() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::raw(500, r#"{"message":"boom"}"#))
        .await;
    let client = ArticleClient::new(service.config()).unwrap();

    let result = client.list_articles(&ListOptions::default()).await;
    match result {
        Err(CoreError::Article(ArticleError::FetchFailed { status_code, .. })) => {
            assert_eq!(status_code, Some(500));
        }
        other => panic!("Expected FetchFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_transport_error_is_fetch_failed() {
    // grab a free port and release it so nothing is listening there
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = ServiceConfig::new(format!("http://127.0.0.1:{port}/rest/v1"), TEST_API_KEY);

    let client = ArticleClient::new(config).unwrap();
    let result = client.list_latest(4).await;
    match result {
        Err(CoreError::Article(ArticleError::FetchFailed { status_code, .. })) => {
            assert_eq!(status_code, None);
        }
        other => panic!("Expected FetchFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::json(json!([{ "post_id": 1, "title": "no category" }])))
        .await;
    let client = ArticleClient::new(service.config()).unwrap();

    let result = client.list_latest(4).await;
    assert!(matches!(
        result,
        Err(CoreError::Article(ArticleError::InvalidResponse { .. }))
    ));
}

#[tokio::test]
async fn test_get_article_by_slug() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::json(json!([article(
            42,
            "Čudan Šešir",
            "Sport",
            "2024-05-02"
        )])))
        .await;
    let client = ArticleClient::new(service.config()).unwrap();

    // title part of the slug is irrelevant, category compare ignores case
    let found = client
        .get_article_by_slug("sport", "some-slug-42")
        .await
        .unwrap();
    assert_eq!(found.post_id, 42);
    assert_eq!(found.slug, "cudan-sesir-42");

    let request = &service.captured_requests().await[0];
    assert_eq!(
        request.query_pairs(),
        vec![
            ("select".to_string(), "*".to_string()),
            ("post_id".to_string(), "eq.42".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_get_article_by_slug_category_mismatch() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::json(json!([article(
            42,
            "Izbori",
            "news",
            "2024-05-02"
        )])))
        .await;
    let client = ArticleClient::new(service.config()).unwrap();

    let err = client
        .get_article_by_slug("sport", "some-slug-42")
        .await
        .unwrap_err();
    match &err {
        CoreError::Article(ArticleError::CategoryMismatch {
            post_id,
            requested,
            actual,
        }) => {
            assert_eq!(post_id, "42");
            assert_eq!(requested, "sport");
            assert_eq!(actual, "news");
        }
        other => panic!("Expected CategoryMismatch, got {:?}", other),
    }
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_get_article_by_slug_not_found() {
    let service = MockService::start().await;
    service.enqueue(MockResponse::json(json!([]))).await;
    let client = ArticleClient::new(service.config()).unwrap();

    let result = client.get_article_by_slug("sport", "missing-99").await;
    if let Err(CoreError::Article(ArticleError::NotFound { post_id })) = result {
        assert_eq!(post_id, "99");
    } else {
        panic!("Expected NotFound error");
    }
}

#[tokio::test]
async fn test_get_article_by_slug_invalid_slug_skips_network() {
    let service = MockService::start().await;
    let client = ArticleClient::new(service.config()).unwrap();

    let result = client.get_article_by_slug("sport", "abc").await;
    assert!(matches!(
        result,
        Err(CoreError::Article(ArticleError::InvalidSlug { .. }))
    ));
    assert!(service.captured_requests().await.is_empty());
}

#[tokio::test]
async fn test_list_latest_query() {
    let service = MockService::start().await;
    service
        .enqueue(MockResponse::json(json!([
            article(9, "Prva", "news", "2024-05-04"),
            article(8, "Druga", "sport", "2024-05-03"),
            article(7, "Treća", "news", "2024-05-02"),
            article(6, "Četvrta", "kultura", "2024-05-01"),
        ])))
        .await;
    let client = ArticleClient::new(service.config()).unwrap();

    let latest = client.list_latest(4).await.unwrap();
    let slugs: Vec<&str> = latest.iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(slugs, vec!["prva-9", "druga-8", "treca-7", "cetvrta-6"]);

    let request = &service.captured_requests().await[0];
    assert_eq!(
        request.query_pairs(),
        vec![
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), "date_unparsed.desc".to_string()),
            ("limit".to_string(), "4".to_string()),
        ]
    );
}
