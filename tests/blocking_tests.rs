use bitbucket_client::blocking::Client;
use bitbucket_client::config::{Config, Credentials, RestApiConfig};
use bitbucket_client::error::AppError;
use mockito::Matcher;
use serde_json::json;

fn test_client(server: &mockito::ServerGuard) -> Client {
    let config = Config {
        credentials: Credentials::bearer("secret-token"),
        rest_api: RestApiConfig {
            base_url: server.url(),
            token_url: format!("{}/site/oauth2/access_token", server.url()),
            timeout: 5,
        },
        owner: Some("acme".to_string()),
    };
    Client::new(config).expect("client construction")
}

#[test]
fn test_blocking_get_user() {
    let mut server = mockito::Server::new();
    let m = server
        .mock("GET", "/2.0/user")
        .match_header("authorization", "Bearer secret-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"username": "jdoe"}"#)
        .create();

    let client = test_client(&server);
    let payload = client.get_user(None).unwrap().unwrap();
    assert_eq!(payload.as_json().unwrap()["username"], json!("jdoe"));
    m.assert();
}

#[test]
fn test_blocking_no_credentials_fails_before_any_request() {
    let config = Config {
        credentials: Credentials::default(),
        rest_api: RestApiConfig::default(),
        owner: Some("acme".to_string()),
    };
    match Client::new(config) {
        Err(AppError::NotAuthenticated(msg)) => assert_eq!(msg, "insufficient credentials"),
        other => panic!("expected NotAuthenticated, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_blocking_all_pages_iterates_the_chain() {
    let mut server = mockito::Server::new();
    let _m1 = server
        .mock("GET", "/2.0/repositories/acme/repo/issues")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"values": [{"id": 1}], "next": "/api?page=2"}).to_string())
        .create();
    let _m2 = server
        .mock("GET", "/api")
        .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"values": [{"id": 2}]}).to_string())
        .create();

    let client = test_client(&server);
    let first = client.get_issues("repo", None).unwrap();
    let ids: Vec<u64> = client
        .all_pages(first)
        .unwrap()
        .map(|item| item.unwrap()["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
}

#[test]
fn test_blocking_put_sends_json_body() {
    let mut server = mockito::Server::new();
    let m = server
        .mock("PUT", "/2.0/repositories/acme/repo/issues/1")
        .match_header("authorization", "Bearer secret-token")
        .match_body(Matcher::Json(json!({"title": "renamed"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id": 1, "title": "renamed"}"#)
        .create();

    let client = test_client(&server);
    let payload = client
        .put(
            "2.0/repositories/acme/repo/issues/1",
            None,
            &json!({"title": "renamed"}),
        )
        .unwrap()
        .unwrap();
    assert_eq!(payload.as_json().unwrap()["title"], json!("renamed"));
    m.assert();
}

#[test]
fn test_blocking_delete_issue_returns_none_on_204() {
    let mut server = mockito::Server::new();
    let m = server
        .mock("DELETE", "/2.0/repositories/acme/repo/issues/9")
        .with_status(204)
        .create();

    let client = test_client(&server);
    assert!(client.delete_issue("repo", 9, None).unwrap().is_none());
    m.assert();
}

#[test]
fn test_blocking_error_mapping_matches_async() {
    let mut server = mockito::Server::new();
    let _m = server
        .mock("GET", "/2.0/repositories/acme/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": {"message": "Repository not found"}}"#)
        .create();

    let client = test_client(&server);
    match client.get_repository("missing", None) {
        Err(AppError::NotFound(msg)) => assert_eq!(msg, "Repository not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}
