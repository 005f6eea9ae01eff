//! # Sisyphus Core
//!
//! Core types, wire codecs, and error definitions shared by the Sisyphus
//! user registry crates. Nothing in here performs I/O: the remote call
//! surface lives in `sisyphus-registry`.

pub mod error;
pub mod metadata;
pub mod result;
pub mod telemetry;
pub mod user;

pub use error::*;
pub use metadata::*;
pub use result::*;
pub use user::*;
