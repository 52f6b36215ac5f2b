#![doc = "The `edge_taskflow` library crate."]
#![doc = ""]
#![doc = "Session-authenticated task tracking over HTTP/JSON: registration and login,"]
#![doc = "per-user task CRUD, and optional AI tag and description suggestions."]
#![doc = "The binary (`main.rs`) wires configuration, storage and the HTTP server together."]

pub mod ai;
pub mod auth;
pub mod config;
pub mod cors;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

pub use error::AppError;
pub use state::AppState;
