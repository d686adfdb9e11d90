//! End-to-end tests of the GraphQL endpoint over HTTP.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{net::SocketAddr, sync::Arc};

use {
    scribe_gateway::build_app,
    scribe_graphql::build_schema,
    scribe_store::InMemoryStore,
    serde_json::{Value, json},
    tokio::net::TcpListener,
};

/// Start a server on an ephemeral port backed by a fresh in-memory store.
async fn start_server(graphiql: bool) -> SocketAddr {
    let schema = build_schema(Arc::new(InMemoryStore::new()));
    let app = build_app(schema, graphiql);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn post(addr: SocketAddr, query: &str) -> Value {
    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/"))
        .json(&json!({ "query": query }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    resp.json().await.unwrap()
}

#[tokio::test]
async fn get_serves_graphiql() {
    let addr = start_server(true).await;
    let resp = reqwest::get(format!("http://{addr}/")).await.unwrap();

    assert_eq!(resp.status(), 200);
    let content_type = resp.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let body = resp.text().await.unwrap();
    assert!(body.contains("graphiql"));
}

#[tokio::test]
async fn get_without_console_is_rejected() {
    let addr = start_server(false).await;
    let resp = reqwest::get(format!("http://{addr}/")).await.unwrap();
    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn post_runs_mutations_and_queries() {
    let addr = start_server(true).await;

    let created = post(
        addr,
        r#"mutation {
            createAuthor(_id: "a1", name: "Ada") { _id }
            createPost(_id: "p1", title: "Hi", bodyContent: "Body", author: "a1") { _id }
        }"#,
    )
    .await;
    assert!(created.get("errors").is_none(), "{created}");

    let body = post(addr, "{ posts { title author { name } } }").await;
    assert_eq!(
        body["data"]["posts"],
        json!([{ "title": "Hi", "author": { "name": "Ada" } }])
    );
}

#[tokio::test]
async fn validation_errors_come_back_in_errors_array() {
    let addr = start_server(true).await;
    let body = post(
        addr,
        r#"mutation { createComment(_id: "c1", content: "nice", author: "a1") { _id } }"#,
    )
    .await;

    assert!(!body["errors"].as_array().unwrap().is_empty());

    let comments = post(addr, "{ comments { _id } }").await;
    assert_eq!(comments["data"]["comments"], json!([]));
}

#[tokio::test]
async fn get_with_query_parameter_executes() {
    let addr = start_server(true).await;
    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/"))
        .query(&[("query", r#"{ author(id: "missing") { name } }"#)])
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "data": { "author": null } }));
}

#[tokio::test]
async fn get_refuses_mutations() {
    let addr = start_server(true).await;
    let resp = reqwest::Client::new()
        .get(format!("http://{addr}/"))
        .query(&[(
            "query",
            r#"mutation { createAuthor(_id: "a1", name: "Ada") { _id } }"#,
        )])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);

    let body = post(addr, "{ authors { _id } }").await;
    assert_eq!(body["data"]["authors"], json!([]));
}

#[tokio::test]
async fn requests_are_isolated_under_concurrency() {
    let addr = start_server(true).await;

    let inserts = (0..20).map(|i| {
        tokio::spawn(async move {
            post(
                addr,
                &format!(r#"mutation {{ createAuthor(_id: "a{i}", name: "n{i}") {{ _id }} }}"#),
            )
            .await
        })
    });
    for handle in inserts {
        let body = handle.await.unwrap();
        assert!(body.get("errors").is_none());
    }

    let body = post(addr, "{ authors { _id } }").await;
    assert_eq!(body["data"]["authors"].as_array().unwrap().len(), 20);
}
