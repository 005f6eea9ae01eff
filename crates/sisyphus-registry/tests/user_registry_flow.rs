//! End-to-end tests for `UserRegistryClient` against the in-memory registry.

use async_trait::async_trait;
use futures::future::join_all;
use serde_json::Value;
use sisyphus_config::RegistryConfig;
use sisyphus_core::{Metadata, SisyphusError, SisyphusResult, UserRecord};
use sisyphus_registry::{ContractInvoker, InMemoryUserRegistry, UserRegistryClient};
use std::sync::Arc;

const SIGNER_SEED: &str = "SCZANGBA5YHTNYVVV4C3U252E2B6P6F5T3U6MM63WBSBZATAQI3EBTQ4";

fn metadata(entries: &[(&str, &str)]) -> Metadata {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn signed_client() -> (UserRegistryClient, Arc<InMemoryUserRegistry>) {
    let config = RegistryConfig::new("CREGISTRY").with_secret_key(SIGNER_SEED);
    let registry = Arc::new(InMemoryUserRegistry::for_config(&config));
    let client = UserRegistryClient::new(config, registry.clone());
    (client, registry)
}

/// Invoker whose transport is always down.
struct UnreachableInvoker;

#[async_trait]
impl ContractInvoker for UnreachableInvoker {
    async fn call(&self, _method: &str, _args: Vec<Value>) -> SisyphusResult<Value> {
        Err(SisyphusError::Transport("endpoint unreachable".to_string()))
    }
}

#[tokio::test]
async fn test_full_user_lifecycle() {
    let (client, registry) = signed_client();
    let user_id = "GUSERADDRESS";

    let created = client
        .create_user(
            user_id,
            "Jane Doe",
            "jane.doe@example.com",
            &metadata(&[
                ("account_type", "standard"),
                ("location", "New York"),
                ("age", "28"),
                ("fitness_level", "intermediate"),
            ]),
        )
        .await;
    assert!(created);

    let user = client.get_user(user_id).await.expect("user should exist");
    assert_eq!(user.name, "Jane Doe");
    assert_eq!(user.metadata["fitness_level"], "intermediate");

    let updated = client
        .update_user(
            user_id,
            "Jane Doe",
            "jane.doe@example.com",
            &metadata(&[
                ("account_type", "premium"),
                ("location", "New York"),
                ("age", "29"),
                ("fitness_level", "advanced"),
                ("preferred_exercise_time", "morning"),
            ]),
        )
        .await;
    assert!(updated);

    let user = client.get_user(user_id).await.expect("user should exist");
    assert_eq!(user.metadata.len(), 5);
    assert_eq!(user.metadata["account_type"], "premium");
    assert_eq!(user.metadata["preferred_exercise_time"], "morning");

    assert!(client.delete_user(user_id).await);
    assert!(client.get_user(user_id).await.is_none());
    assert!(registry.is_empty());
}

#[tokio::test]
async fn test_round_trip_through_registry_preserves_metadata() {
    let (client, _) = signed_client();
    let original = metadata(&[
        ("preferred_exercises", "walking,cycling"),
        ("settings", "default"),
        ("emoji", "💪"),
        ("empty", ""),
    ]);

    assert!(client.create_user("GADDR1", "John Doe", "john@example.com", &original).await);

    let user = client.get_user("GADDR1").await.unwrap();
    assert_eq!(user, UserRecord::new("John Doe", "john@example.com", original));
}

#[tokio::test]
async fn test_create_existing_user_returns_false() {
    let (client, _) = signed_client();
    assert!(client.create_user("GADDR1", "A", "a@x.io", &Metadata::new()).await);
    assert!(!client.create_user("GADDR1", "B", "b@x.io", &Metadata::new()).await);

    let user = client.get_user("GADDR1").await.unwrap();
    assert_eq!(user.name, "A");
}

#[tokio::test]
async fn test_update_and_delete_unknown_user_return_false() {
    let (client, _) = signed_client();
    assert!(!client.update_user("GNOBODY", "A", "a@x.io", &Metadata::new()).await);
    assert!(!client.delete_user("GNOBODY").await);
    assert!(!client.try_delete_user("GNOBODY").await.unwrap());
}

#[tokio::test]
async fn test_read_only_client_cannot_mutate() {
    let config = RegistryConfig::new("CREGISTRY");
    let registry = Arc::new(InMemoryUserRegistry::for_config(&config));
    let client = UserRegistryClient::new(config, registry);

    assert!(!client.create_user("GADDR1", "A", "a@x.io", &Metadata::new()).await);

    let result = client.try_create_user("GADDR1", "A", "a@x.io", &Metadata::new()).await;
    assert!(matches!(result, Err(SisyphusError::Unauthorized(_))));
    assert!(client.get_user("GADDR1").await.is_none());
}

#[tokio::test]
async fn test_unreachable_endpoint_folds_into_negative_results() {
    let client =
        UserRegistryClient::new(RegistryConfig::new("CREGISTRY"), Arc::new(UnreachableInvoker));

    assert!(!client.create_user("GADDR1", "A", "a@x.io", &Metadata::new()).await);
    assert!(!client.update_user("GADDR1", "A", "a@x.io", &Metadata::new()).await);
    assert!(!client.delete_user("GADDR1").await);
    assert!(client.get_user("GADDR1").await.is_none());
    assert!(client.list_user_ids().await.is_empty());

    let err = client.try_get_user("GADDR1").await.unwrap_err();
    assert!(err.is_retriable());
}

#[tokio::test]
async fn test_list_user_ids_in_registration_order() {
    let (client, _) = signed_client();
    for id in ["GADDR3", "GADDR1", "GADDR2"] {
        assert!(client.create_user(id, "User", "u@x.io", &Metadata::new()).await);
    }
    assert!(client.delete_user("GADDR1").await);

    assert_eq!(client.list_user_ids().await, vec!["GADDR3", "GADDR2"]);
}

#[tokio::test]
async fn test_concurrent_creates_share_one_client() {
    let (client, registry) = signed_client();
    let client = Arc::new(client);

    let calls = (0..16).map(|i| {
        let client = Arc::clone(&client);
        async move {
            let user_id = format!("GADDR{}", i);
            let index = i.to_string();
            let entries = metadata(&[("index", index.as_str())]);
            client.create_user(&user_id, "User", "u@x.io", &entries).await
        }
    });

    let results = join_all(calls).await;
    assert!(results.into_iter().all(|created| created));
    assert_eq!(registry.len(), 16);

    let user = client.get_user("GADDR7").await.unwrap();
    assert_eq!(user.metadata["index"], "7");
}

#[tokio::test]
async fn test_concurrent_duplicate_creates_admit_exactly_one() {
    let (client, registry) = signed_client();
    let client = Arc::new(client);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = Arc::clone(&client);
            tokio::spawn(async move {
                client
                    .create_user("GSAME", &format!("User {}", i), "u@x.io", &Metadata::new())
                    .await
            })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(registry.len(), 1);
}
