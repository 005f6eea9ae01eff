//! User registry client.
//!
//! Two surfaces over the same calls:
//!
//! - `try_*` methods return [`SisyphusResult`] so callers can tell a missing
//!   record from a transport failure or a malformed response.
//! - The plain methods keep the registry's boolean/option contract: every
//!   failure is logged and folded into `false` or `None`.

use crate::invoker::{ContractInvoker, RegistryMethod};
use serde_json::Value;
use sisyphus_config::RegistryConfig;
use sisyphus_core::{
    encode_metadata, ContractUserRecord, Metadata, SisyphusError, SisyphusResult, UserRecord,
};
use std::sync::Arc;
use tracing::{debug, error};

/// Client for the user registry program.
///
/// Holds only the immutable configuration captured at construction, so it
/// can be shared across tasks behind an `Arc` and called concurrently.
#[derive(Clone)]
pub struct UserRegistryClient {
    config: RegistryConfig,
    invoker: Arc<dyn ContractInvoker>,
}

impl UserRegistryClient {
    /// Creates a new client for the configured registry.
    pub fn new(config: RegistryConfig, invoker: Arc<dyn ContractInvoker>) -> Self {
        Self { config, invoker }
    }

    /// Returns the configuration this client was built with.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the registry contract identifier.
    #[must_use]
    pub fn contract_id(&self) -> &str {
        &self.config.contract_id
    }

    /// Returns the RPC endpoint URL.
    #[must_use]
    pub fn network_url(&self) -> &str {
        &self.config.network_url
    }

    // ============ Typed surface ============

    /// Creates a user.
    ///
    /// `Ok(false)` means the registry declined (e.g. the user already exists).
    pub async fn try_create_user(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        metadata: &Metadata,
    ) -> SisyphusResult<bool> {
        debug!(user_id, contract_id = %self.config.contract_id, "Creating user");

        let args = user_args(user_id, name, email, metadata)?;
        self.invoke_mutation(RegistryMethod::CreateUser, args).await
    }

    /// Gets a user. `Ok(None)` means the registry returned no record.
    pub async fn try_get_user(&self, user_id: &str) -> SisyphusResult<Option<UserRecord>> {
        debug!(user_id, contract_id = %self.config.contract_id, "Getting user");

        let result = self
            .invoker
            .call(RegistryMethod::GetUser.as_str(), vec![Value::from(user_id)])
            .await?;

        if is_falsy(&result) {
            debug!(user_id, "User not found");
            return Ok(None);
        }

        let record: ContractUserRecord = serde_json::from_value(result).map_err(|e| {
            SisyphusError::decode(format!(
                "{} returned an unexpected shape: {}",
                RegistryMethod::GetUser,
                e
            ))
        })?;

        Ok(Some(UserRecord::from(record)))
    }

    /// Replaces a user's name, email and metadata.
    pub async fn try_update_user(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        metadata: &Metadata,
    ) -> SisyphusResult<bool> {
        debug!(user_id, contract_id = %self.config.contract_id, "Updating user");

        let args = user_args(user_id, name, email, metadata)?;
        self.invoke_mutation(RegistryMethod::UpdateUser, args).await
    }

    /// Deletes a user.
    pub async fn try_delete_user(&self, user_id: &str) -> SisyphusResult<bool> {
        debug!(user_id, contract_id = %self.config.contract_id, "Deleting user");

        self.invoke_mutation(RegistryMethod::DeleteUser, vec![Value::from(user_id)])
            .await
    }

    /// Lists every registered user id, in registration order.
    pub async fn try_list_user_ids(&self) -> SisyphusResult<Vec<String>> {
        debug!(contract_id = %self.config.contract_id, "Listing user ids");

        let result = self
            .invoker
            .call(RegistryMethod::GetAllUserIds.as_str(), Vec::new())
            .await?;

        if result.is_null() {
            return Ok(Vec::new());
        }

        serde_json::from_value(result).map_err(|e| {
            SisyphusError::decode(format!(
                "{} returned an unexpected shape: {}",
                RegistryMethod::GetAllUserIds,
                e
            ))
        })
    }

    // ============ Boolean/option surface ============

    /// Creates a user. Returns `true` only if the registry answered `true`.
    pub async fn create_user(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        metadata: &Metadata,
    ) -> bool {
        let result = self.try_create_user(user_id, name, email, metadata).await;
        absorb(RegistryMethod::CreateUser, user_id, result).unwrap_or(false)
    }

    /// Gets a user. Not found and failure both yield `None`.
    pub async fn get_user(&self, user_id: &str) -> Option<UserRecord> {
        let result = self.try_get_user(user_id).await;
        absorb(RegistryMethod::GetUser, user_id, result).flatten()
    }

    /// Updates a user. Returns `true` only if the registry answered `true`.
    pub async fn update_user(
        &self,
        user_id: &str,
        name: &str,
        email: &str,
        metadata: &Metadata,
    ) -> bool {
        let result = self.try_update_user(user_id, name, email, metadata).await;
        absorb(RegistryMethod::UpdateUser, user_id, result).unwrap_or(false)
    }

    /// Deletes a user. Returns `true` only if the registry answered `true`.
    pub async fn delete_user(&self, user_id: &str) -> bool {
        let result = self.try_delete_user(user_id).await;
        absorb(RegistryMethod::DeleteUser, user_id, result).unwrap_or(false)
    }

    /// Lists registered user ids. Failure yields an empty list.
    pub async fn list_user_ids(&self) -> Vec<String> {
        let result = self.try_list_user_ids().await;
        absorb(RegistryMethod::GetAllUserIds, "", result).unwrap_or_default()
    }

    async fn invoke_mutation(
        &self,
        method: RegistryMethod,
        args: Vec<Value>,
    ) -> SisyphusResult<bool> {
        let result = self.invoker.call(method.as_str(), args).await?;

        match result {
            Value::Bool(accepted) => {
                if !accepted {
                    debug!(method = %method, "Registry declined the call");
                }
                Ok(accepted)
            }
            other => Err(SisyphusError::decode(format!(
                "{} returned a non-boolean result: {}",
                method, other
            ))),
        }
    }
}

/// Positional arguments for create/update: id, name, email, encoded metadata.
fn user_args(
    user_id: &str,
    name: &str,
    email: &str,
    metadata: &Metadata,
) -> SisyphusResult<Vec<Value>> {
    let metadata = serde_json::to_value(encode_metadata(metadata))
        .map_err(|e| SisyphusError::internal(format!("Failed to encode metadata: {}", e)))?;

    Ok(vec![
        Value::from(user_id),
        Value::from(name),
        Value::from(email),
        metadata,
    ])
}

/// Falsy per the registry's loose result convention.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Logs and drops the error; the diagnostic log is the only place it surfaces.
fn absorb<T>(method: RegistryMethod, user_id: &str, result: SisyphusResult<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!(
                method = %method,
                user_id,
                error_code = e.error_code(),
                error = %e,
                "Registry call failed"
            );
            None
        }
    }
}
