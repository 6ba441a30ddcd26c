//! The authenticated request pipeline.
//!
//! Every call goes through [`ApiClient`]: the request phase attaches the bearer token
//! from the session store, the response phase unwraps the backend envelope and maps
//! failures onto [`ApiError`]. Failures are announced through a [`Notifier`] before
//! they are returned, and a 401 tears the local session down and broadcasts
//! [`SessionEvent::Invalidated`].

pub mod client;
pub mod error;
pub mod notify;

pub use client::{ApiClient, SessionEvent};
pub use error::ApiError;
pub use notify::{ConsoleNotifier, MemoryNotifier, Notifier};
