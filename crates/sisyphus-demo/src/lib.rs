//! Example flow: register a user, read it back, update it, delete it.

use sisyphus_core::{Metadata, UserRecord};
use sisyphus_registry::UserRegistryClient;
use tracing::info;

/// Outcome of each step of [`run_example_flow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowReport {
    pub created: bool,
    pub fetched: Option<UserRecord>,
    pub updated: bool,
    pub refetched: Option<UserRecord>,
    pub deleted: bool,
    pub after_delete: Option<UserRecord>,
}

fn metadata(entries: &[(&str, &str)]) -> Metadata {
    entries
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

fn log_user(label: &str, user: Option<&UserRecord>) {
    match user {
        Some(user) => {
            info!(name = %user.name, email = %user.email, "{}: user found", label);
            for (key, value) in &user.metadata {
                info!("  {}: {}", key, value);
            }
        }
        None => info!("{}: user not found", label),
    }
}

/// Runs create, get, update, get, delete, get for `user_id`.
pub async fn run_example_flow(client: &UserRegistryClient, user_id: &str) -> FlowReport {
    info!(user_id, "Creating user...");
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
    info!("User creation {}", if created { "succeeded" } else { "failed" });

    let fetched = client.get_user(user_id).await;
    log_user("Retrieve", fetched.as_ref());

    info!(user_id, "Updating user...");
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
    info!("User update {}", if updated { "succeeded" } else { "failed" });

    let refetched = client.get_user(user_id).await;
    log_user("Retrieve after update", refetched.as_ref());

    info!(user_id, "Deleting user...");
    let deleted = client.delete_user(user_id).await;
    info!("User deletion {}", if deleted { "succeeded" } else { "failed" });

    let after_delete = client.get_user(user_id).await;
    log_user("Retrieve after delete", after_delete.as_ref());

    FlowReport {
        created,
        fetched,
        updated,
        refetched,
        deleted,
        after_delete,
    }
}
