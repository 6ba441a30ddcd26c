//! Library exports for distri-client, shared between the binary and tests.

pub mod auth;
pub mod cli;
pub mod config;
pub mod http;
pub mod models;
pub mod router;
pub mod startup;
pub mod state;
pub mod store;
pub mod utils;
