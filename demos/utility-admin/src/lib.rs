//! Utility back-office state.
//!
//! Wires the generic resource engine to the five resources a utility's
//! back office manages and scopes them into one application store.

pub mod app;
pub mod config;
pub mod resources;

pub use app::{admin_reducer, admin_store, AdminAction, AdminReducer, AdminState, AdminStore};
pub use config::{AdminConfig, ConfigError};
