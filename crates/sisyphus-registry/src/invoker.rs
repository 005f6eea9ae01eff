//! The remote call primitive the client is built on.

use async_trait::async_trait;
use serde_json::Value;
use sisyphus_core::SisyphusResult;
use std::fmt;
use std::str::FromStr;

/// Methods exposed by the user registry program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistryMethod {
    CreateUser,
    GetUser,
    UpdateUser,
    DeleteUser,
    GetAllUserIds,
}

impl RegistryMethod {
    /// Returns the method name as the remote program knows it.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::GetUser => "get_user",
            Self::UpdateUser => "update_user",
            Self::DeleteUser => "delete_user",
            Self::GetAllUserIds => "get_all_user_ids",
        }
    }

    /// Returns true if the method changes remote state.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        matches!(self, Self::CreateUser | Self::UpdateUser | Self::DeleteUser)
    }
}

impl fmt::Display for RegistryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegistryMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create_user" => Ok(Self::CreateUser),
            "get_user" => Ok(Self::GetUser),
            "update_user" => Ok(Self::UpdateUser),
            "delete_user" => Ok(Self::DeleteUser),
            "get_all_user_ids" => Ok(Self::GetAllUserIds),
            _ => Err(format!("Unknown registry method: {}", s)),
        }
    }
}

/// Generic remote invocation primitive.
///
/// Invokes `method` on the registry program with positional `args` and
/// resolves to the program's result. Signing, transport and any timeout
/// behaviour belong to the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContractInvoker: Send + Sync {
    /// Invokes a named method.
    async fn call(&self, method: &str, args: Vec<Value>) -> SisyphusResult<Value>;
}
