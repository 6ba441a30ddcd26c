use super::location::{encode_query_value, Location};
use super::routes::{RouteDescriptor, DASHBOARD_PATH, LOGIN_PATH, REGISTER_PATH};

/// Query parameter carrying the originally requested path through the login page.
pub const REDIRECT_PARAM: &str = "redirect";

/// Outcome of one guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Proceed,
    Redirect(String),
}

/// The one authorization rule of the client: private routes need a session, and the
/// login/register pages are pointless once you have one.
///
/// Purely local: `logged_in` is whatever the session store says, which may be stale.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    login_path: &'static str,
    register_path: &'static str,
    landing_path: &'static str,
}

impl Default for NavigationGuard {
    fn default() -> Self {
        NavigationGuard {
            login_path: LOGIN_PATH,
            register_path: REGISTER_PATH,
            landing_path: DASHBOARD_PATH,
        }
    }
}

impl NavigationGuard {
    pub fn evaluate(&self, route: &RouteDescriptor, to: &Location, logged_in: bool) -> Decision {
        if route.requires_auth {
            return if logged_in {
                Decision::Proceed
            } else {
                Decision::Redirect(self.login_redirect(to))
            };
        }

        let is_entry_page = to.path() == self.login_path || to.path() == self.register_path;
        if is_entry_page && logged_in {
            Decision::Redirect(self.landing_path.to_string())
        } else {
            Decision::Proceed
        }
    }

    pub fn landing_path(&self) -> &'static str {
        self.landing_path
    }

    fn login_redirect(&self, to: &Location) -> String {
        format!(
            "{}?{}={}",
            self.login_path,
            REDIRECT_PARAM,
            encode_query_value(to.full_path())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouteTable;

    fn decide(target: &str, logged_in: bool) -> Decision {
        let table = RouteTable::default();
        let to = Location::parse(target);
        let route = table.resolve(to.path()).unwrap();
        NavigationGuard::default().evaluate(route, &to, logged_in)
    }

    #[test]
    fn private_route_without_session_goes_to_login_with_redirect() {
        assert_eq!(
            decide("/dashboard", false),
            Decision::Redirect("/login?redirect=/dashboard".to_string())
        );
    }

    #[test]
    fn redirect_keeps_the_full_path() {
        assert_eq!(
            decide("/dashboard?tab=friends", false),
            Decision::Redirect("/login?redirect=/dashboard%3Ftab%3Dfriends".to_string())
        );
    }

    #[test]
    fn private_route_with_session_proceeds() {
        assert_eq!(decide("/dashboard", true), Decision::Proceed);
    }

    #[test]
    fn entry_pages_bounce_logged_in_users() {
        assert_eq!(decide("/login", true), Decision::Redirect("/dashboard".to_string()));
        assert_eq!(decide("/register", true), Decision::Redirect("/dashboard".to_string()));
    }

    #[test]
    fn entry_pages_are_open_without_session() {
        assert_eq!(decide("/login", false), Decision::Proceed);
        assert_eq!(decide("/register", false), Decision::Proceed);
    }
}
