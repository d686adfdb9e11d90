//! Behaviour shared by every document store backend.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use {
    rstest::rstest,
    scribe_config::{StoreBackend, StoreConfig},
    scribe_store::{Collection, Document, DocumentStore, Filter, open_store},
    serde_json::{Value, json},
};

async fn open(backend: StoreBackend) -> Arc<dyn DocumentStore> {
    open_store(&StoreConfig {
        backend,
        database_url: "sqlite::memory:".into(),
        max_connections: 1,
    })
    .await
    .unwrap()
}

fn doc(v: Value) -> Document {
    v.as_object().cloned().unwrap()
}

#[rstest]
#[case::memory(StoreBackend::Memory)]
#[case::sqlite(StoreBackend::Sqlite)]
#[tokio::test]
async fn reverse_lookup_returns_only_matching_documents(#[case] backend: StoreBackend) {
    let store = open(backend).await;
    for (id, post) in [("c1", "p1"), ("c2", "p2"), ("c3", "p1")] {
        store
            .insert(
                Collection::Comments,
                doc(json!({ "_id": id, "post": post, "author": "a1" })),
            )
            .await
            .unwrap();
    }

    let mut ids: Vec<String> = store
        .find(Collection::Comments, &Filter::eq("post", "p1"))
        .await
        .unwrap()
        .into_iter()
        .filter_map(|d| d["_id"].as_str().map(str::to_string))
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["c1", "c3"]);
}

#[rstest]
#[case::memory(StoreBackend::Memory)]
#[case::sqlite(StoreBackend::Sqlite)]
#[tokio::test]
async fn documents_come_back_unchanged(#[case] backend: StoreBackend) {
    let store = open(backend).await;
    let original = doc(json!({
        "_id": "p1",
        "title": "Hi",
        "bodyContent": "Body",
        "author": "a1",
        "tags": ["rust", 1, null],
    }));
    store.insert(Collection::Posts, original.clone()).await.unwrap();

    let found = store
        .find_one(Collection::Posts, &Filter::by_id("p1"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, original);
}

#[rstest]
#[case::memory(StoreBackend::Memory)]
#[case::sqlite(StoreBackend::Sqlite)]
#[tokio::test]
async fn repeated_reads_are_identical(#[case] backend: StoreBackend) {
    let store = open(backend).await;
    for id in ["a1", "a2", "a3"] {
        store
            .insert(Collection::Authors, doc(json!({ "_id": id, "name": id })))
            .await
            .unwrap();
    }

    let first = store.find(Collection::Authors, &Filter::all()).await.unwrap();
    let second = store.find(Collection::Authors, &Filter::all()).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
    store.close().await;
}
