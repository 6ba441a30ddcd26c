pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Static configuration for one navigable path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub title: Option<&'static str>,
    pub requires_auth: bool,
    /// Paths that exist only to send you somewhere else.
    pub redirect: Option<&'static str>,
}

impl RouteDescriptor {
    pub const fn page(path: &'static str, title: &'static str, requires_auth: bool) -> Self {
        RouteDescriptor {
            path,
            title: Some(title),
            requires_auth,
            redirect: None,
        }
    }

    pub const fn redirect(path: &'static str, to: &'static str) -> Self {
        RouteDescriptor {
            path,
            title: None,
            requires_auth: false,
            redirect: Some(to),
        }
    }
}

pub const ROUTES: [RouteDescriptor; 4] = [
    RouteDescriptor::redirect(ROOT_PATH, LOGIN_PATH),
    RouteDescriptor::page(LOGIN_PATH, "Login", false),
    RouteDescriptor::page(REGISTER_PATH, "Register", false),
    RouteDescriptor::page(DASHBOARD_PATH, "Dashboard", true),
];

/// Lookup from path to descriptor. Paths are matched exactly.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Self {
        RouteTable { routes }
    }

    pub fn resolve(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn routes(&self) -> &[RouteDescriptor] {
        &self.routes
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new(ROUTES.to_vec())
    }
}
