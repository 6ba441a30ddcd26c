//! Client-side routing: the static route table, the per-transition guard, and the
//! navigator that applies guard decisions and owns the current location.

pub mod guard;
pub mod location;
pub mod navigator;
pub mod routes;

pub use guard::{Decision, NavigationGuard};
pub use location::Location;
pub use navigator::{NavigationError, Navigator};
pub use routes::{RouteDescriptor, RouteTable, DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH};
