//! # Sisyphus Registry
//!
//! Client facade over the user registry program. Every operation is one
//! round trip through a [`ContractInvoker`]; the client keeps no local copy
//! of any record.

pub mod client;
pub mod invoker;
pub mod memory;

pub use client::*;
pub use invoker::*;
pub use memory::*;
