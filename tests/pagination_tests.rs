use bitbucket_client::config::{Config, Credentials, RestApiConfig};
use bitbucket_client::error::AppError;
use bitbucket_client::prelude::Client;
use mockito::Matcher;
use serde_json::json;

async fn test_client(server: &mockito::ServerGuard) -> Client {
    let config = Config {
        credentials: Credentials::bearer("secret-token"),
        rest_api: RestApiConfig {
            base_url: server.url(),
            token_url: format!("{}/site/oauth2/access_token", server.url()),
            timeout: 5,
        },
        owner: Some("acme".to_string()),
    };
    Client::new(config).await.expect("client construction")
}

#[tokio::test]
async fn test_all_pages_on_none_first_page_yields_empty_sequence() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/2.0/repositories/acme/repo/issues")
        .with_status(204)
        .create_async()
        .await;

    let client = test_client(&server).await;
    let first = client.get_issues("repo", None).await.unwrap();
    assert!(first.is_none());

    let items = client.all_pages(first).unwrap().collect_all().await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_all_pages_single_page_yields_items_without_follow_up() {
    let mut server = mockito::Server::new_async().await;
    let m = server
        .mock("GET", "/2.0/repositories/acme/repo/issues")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"values": [{"id": 1}, {"id": 2}, {"id": 3}]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server).await;
    let first = client.get_issues("repo", None).await.unwrap();
    let items = client.all_pages(first).unwrap().collect_all().await.unwrap();

    assert_eq!(items, vec![json!({"id": 1}), json!({"id": 2}), json!({"id": 3})]);
    // The only request is the first-page fetch.
    m.assert_async().await;
}

#[tokio::test]
async fn test_all_pages_follows_next_locators_in_order() {
    let mut server = mockito::Server::new_async().await;
    let _m1 = server
        .mock("GET", "/2.0/repositories/acme/repo/issues")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"values": [{"id": 1}, {"id": 2}], "next": "/api?page=2"}).to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let m2 = server
        .mock("GET", "/api")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"values": [{"id": 3}, {"id": 4}], "next": "/api?page=3"}).to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let m3 = server
        .mock("GET", "/api")
        .match_query(Matcher::UrlEncoded("page".into(), "3".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"values": [{"id": 5}, {"id": 6}]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let client = test_client(&server).await;
    let first = client.get_issues("repo", None).await.unwrap();
    let items = client.all_pages(first).unwrap().collect_all().await.unwrap();

    let ids: Vec<_> = items.iter().map(|v| v["id"].as_u64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    // Exactly two follow-up GETs, one per locator.
    m2.assert_async().await;
    m3.assert_async().await;
}

#[tokio::test]
async fn test_all_pages_fetches_next_page_lazily() {
    let mut server = mockito::Server::new_async().await;
    let _m1 = server
        .mock("GET", "/2.0/repositories/acme/repo/issues")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"values": [{"id": 1}, {"id": 2}], "next": "/api?page=2"}).to_string(),
        )
        .create_async()
        .await;
    let m2 = server
        .mock("GET", "/api")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"values": [{"id": 3}]}).to_string())
        .create_async()
        .await;

    let client = test_client(&server).await;
    let first = client.get_issues("repo", None).await.unwrap();
    let mut pager = client.all_pages(first).unwrap();

    assert_eq!(pager.try_next().await.unwrap().unwrap()["id"], json!(1));
    assert_eq!(pager.try_next().await.unwrap().unwrap()["id"], json!(2));
    // The buffered page is exhausted but the follow-up has not fired yet.
    assert!(!m2.matched_async().await);

    assert_eq!(pager.try_next().await.unwrap().unwrap()["id"], json!(3));
    assert!(m2.matched_async().await);
    assert!(pager.try_next().await.unwrap().is_none());
}

#[tokio::test]
async fn test_all_pages_propagates_follow_up_errors() {
    let mut server = mockito::Server::new_async().await;
    let _m1 = server
        .mock("GET", "/2.0/repositories/acme/repo/issues")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"values": [{"id": 1}], "next": "/api?page=2"}).to_string())
        .create_async()
        .await;
    let _m2 = server
        .mock("GET", "/api")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "boom"}}"#)
        .create_async()
        .await;

    let client = test_client(&server).await;
    let first = client.get_issues("repo", None).await.unwrap();
    let mut pager = client.all_pages(first).unwrap();

    assert_eq!(pager.try_next().await.unwrap().unwrap()["id"], json!(1));
    match pager.try_next().await {
        Err(AppError::Unknown(msg)) => assert_eq!(msg, "boom"),
        other => panic!("expected Unknown, got {other:?}"),
    }
}

#[tokio::test]
async fn test_all_pages_skips_empty_pages_in_the_chain() {
    let mut server = mockito::Server::new_async().await;
    let _m1 = server
        .mock("GET", "/2.0/repositories/acme/repo/issues")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"values": [], "next": "/api?page=2"}).to_string())
        .create_async()
        .await;
    let _m2 = server
        .mock("GET", "/api")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"values": [{"id": 9}]}).to_string())
        .create_async()
        .await;

    let client = test_client(&server).await;
    let first = client.get_issues("repo", None).await.unwrap();
    let items = client.all_pages(first).unwrap().collect_all().await.unwrap();
    assert_eq!(items, vec![json!({"id": 9})]);
}
