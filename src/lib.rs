//! Tessera (workspace facade crate).
//!
//! This package exposes `tessera::{core,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use tessera_core as core;
pub use tessera_types as types;

pub mod probe;
