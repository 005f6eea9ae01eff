//! In-process stand-in for the user registry program.
//!
//! Answers the same call surface with the same results the deployed program
//! gives: duplicate creates and updates/deletes of unknown users return
//! `false`, missing users read as `null`, and ids are listed in registration
//! order. Used by tests and the demo binary.

use crate::invoker::{ContractInvoker, RegistryMethod};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use sisyphus_config::RegistryConfig;
use sisyphus_core::{
    ContractMetadataMap, ContractUserRecord, SisyphusError, SisyphusResult, UserRecord,
};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Default)]
struct RegistryState {
    users: HashMap<String, UserRecord>,
    user_ids: Vec<String>,
}

/// In-memory user registry.
pub struct InMemoryUserRegistry {
    state: RwLock<RegistryState>,
    authorized: bool,
}

impl Default for InMemoryUserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRegistry {
    /// Creates an empty registry that authorizes every mutating call.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            authorized: true,
        }
    }

    /// Creates an empty registry that rejects mutating calls, as the
    /// platform does for a caller without a signing key.
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            state: RwLock::new(RegistryState::default()),
            authorized: false,
        }
    }

    /// Creates a registry whose authorization follows `config`'s signer.
    #[must_use]
    pub fn for_config(config: &RegistryConfig) -> Self {
        if config.has_signer() {
            Self::new()
        } else {
            Self::read_only()
        }
    }

    /// Number of registered users.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().users.len()
    }

    /// Returns true if no user is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().users.is_empty()
    }

    /// Only mutating methods need a signer.
    fn require_auth(&self, method: RegistryMethod, user_id: &str) -> SisyphusResult<()> {
        if self.authorized || !method.is_mutating() {
            Ok(())
        } else {
            warn!(method = %method, user_id, "Mutating call without a signer");
            Err(SisyphusError::Unauthorized(format!(
                "{} requires a signature for {}",
                method, user_id
            )))
        }
    }

    fn create_user(&self, args: &[Value]) -> SisyphusResult<Value> {
        let method = RegistryMethod::CreateUser;
        expect_arity(method, args, 4)?;
        let user_id = string_arg(method, args, 0, "user_id")?;
        let record = record_args(method, args)?;

        let mut state = self.state.write();
        if state.users.contains_key(&user_id) {
            debug!(user_id = %user_id, "User already registered");
            return Ok(Value::Bool(false));
        }
        self.require_auth(method, &user_id)?;

        state.users.insert(user_id.clone(), record);
        state.user_ids.push(user_id);
        Ok(Value::Bool(true))
    }

    fn update_user(&self, args: &[Value]) -> SisyphusResult<Value> {
        let method = RegistryMethod::UpdateUser;
        expect_arity(method, args, 4)?;
        let user_id = string_arg(method, args, 0, "user_id")?;
        let record = record_args(method, args)?;

        let mut state = self.state.write();
        if !state.users.contains_key(&user_id) {
            return Ok(Value::Bool(false));
        }
        self.require_auth(method, &user_id)?;

        state.users.insert(user_id, record);
        Ok(Value::Bool(true))
    }

    fn get_user(&self, args: &[Value]) -> SisyphusResult<Value> {
        let method = RegistryMethod::GetUser;
        expect_arity(method, args, 1)?;
        let user_id = string_arg(method, args, 0, "user_id")?;

        let state = self.state.read();
        match state.users.get(&user_id) {
            Some(record) => Ok(serde_json::to_value(ContractUserRecord::from(record))?),
            None => Ok(Value::Null),
        }
    }

    fn delete_user(&self, args: &[Value]) -> SisyphusResult<Value> {
        let method = RegistryMethod::DeleteUser;
        expect_arity(method, args, 1)?;
        let user_id = string_arg(method, args, 0, "user_id")?;

        let mut state = self.state.write();
        if !state.users.contains_key(&user_id) {
            return Ok(Value::Bool(false));
        }
        self.require_auth(method, &user_id)?;

        state.users.remove(&user_id);
        state.user_ids.retain(|id| *id != user_id);
        Ok(Value::Bool(true))
    }

    fn get_all_user_ids(&self, args: &[Value]) -> SisyphusResult<Value> {
        expect_arity(RegistryMethod::GetAllUserIds, args, 0)?;
        let ids = self.state.read().user_ids.clone();
        Ok(Value::from(ids))
    }
}

#[async_trait]
impl ContractInvoker for InMemoryUserRegistry {
    async fn call(&self, method: &str, args: Vec<Value>) -> SisyphusResult<Value> {
        let method: RegistryMethod = method
            .parse()
            .map_err(|message: String| SisyphusError::remote(method, message))?;

        debug!(method = %method, arg_count = args.len(), "In-memory registry call");

        match method {
            RegistryMethod::CreateUser => self.create_user(&args),
            RegistryMethod::GetUser => self.get_user(&args),
            RegistryMethod::UpdateUser => self.update_user(&args),
            RegistryMethod::DeleteUser => self.delete_user(&args),
            RegistryMethod::GetAllUserIds => self.get_all_user_ids(&args),
        }
    }
}

fn expect_arity(method: RegistryMethod, args: &[Value], expected: usize) -> SisyphusResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(SisyphusError::validation(format!(
            "{} expects {} arguments, got {}",
            method,
            expected,
            args.len()
        )))
    }
}

fn string_arg(
    method: RegistryMethod,
    args: &[Value],
    index: usize,
    name: &str,
) -> SisyphusResult<String> {
    args.get(index)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            SisyphusError::validation(format!(
                "{}: argument '{}' must be a string",
                method, name
            ))
        })
}

/// Reads name, email and encoded metadata from positions 1..=3.
fn record_args(method: RegistryMethod, args: &[Value]) -> SisyphusResult<UserRecord> {
    let name = string_arg(method, args, 1, "name")?;
    let email = string_arg(method, args, 2, "email")?;
    let metadata: ContractMetadataMap = args
        .get(3)
        .cloned()
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| SisyphusError::validation(format!("{}: malformed metadata: {}", method, e)))?
        .unwrap_or_default();

    Ok(UserRecord::new(name, email, metadata.into_metadata()))
}
