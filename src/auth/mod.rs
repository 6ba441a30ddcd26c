pub mod service;

// Re-export from service.rs so we can do "use crate::auth::*;"
pub use service::{AuthError, AuthService};
