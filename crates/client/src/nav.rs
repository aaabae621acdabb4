//! The router-level adapter.
//!
//! Guards only produce decision values; the `Navigator` is the one place
//! those decisions are acted on. It resolves a requested path against the
//! screen table, runs the applicable guard, and follows redirects until a
//! screen admits the session.

use tracing::instrument;

use crate::guards::{self, GuardDecision};
use crate::routes::{self, Access, ScreenSpec};
use crate::session::Session;

/// Redirect chains in the screen table are at most two hops; anything longer
/// indicates a broken table.
const MAX_REDIRECTS: usize = 8;

/// Result of a navigation attempt.
#[derive(Debug, Clone)]
pub struct Navigation {
    /// The path originally asked for.
    pub requested: String,
    /// The screen the session actually landed on.
    pub destination: &'static ScreenSpec,
    /// Redirects followed on the way, in order. Empty when access to the
    /// requested screen was granted directly.
    pub redirects: Vec<&'static str>,
}

impl Navigation {
    /// Whether the requested screen itself was reached.
    #[must_use]
    pub fn reached_target(&self) -> bool {
        self.redirects.is_empty()
    }
}

/// Performs navigation on behalf of a view layer.
#[derive(Debug, Clone)]
pub struct Navigator {
    session: Session,
}

impl Navigator {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Navigate to a path, following guard redirects to a final screen.
    #[instrument(skip(self))]
    #[must_use]
    pub fn navigate(&self, path: &str) -> Navigation {
        let mut redirects = Vec::new();
        let mut current: &str = path;

        for _ in 0..MAX_REDIRECTS {
            let Some(screen) = routes::resolve(current) else {
                tracing::debug!(path = current, "no screen matches, showing not-found");
                return Navigation {
                    requested: path.to_owned(),
                    destination: routes::not_found(),
                    redirects,
                };
            };

            let decision = match screen.access {
                Access::Public => GuardDecision::Allow,
                Access::Protected(_) => guards::protected_area(&self.session, screen),
                Access::GuestOnly => guards::guest_only(&self.session),
            };

            match decision {
                GuardDecision::Allow => {
                    return Navigation {
                        requested: path.to_owned(),
                        destination: screen,
                        redirects,
                    };
                }
                GuardDecision::Deny { redirect } => {
                    tracing::debug!(from = current, to = redirect, "guard redirect");
                    redirects.push(redirect);
                    current = redirect;
                }
            }
        }

        tracing::warn!(path, "redirect chain exceeded bound, showing not-found");
        Navigation {
            requested: path.to_owned(),
            destination: routes::not_found(),
            redirects,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::routes::paths;
    use crate::session::tests::{authenticated_session, empty_session, sample_user};
    use crate::token::tests::token_expiring_at;
    use aos_micepp_core::Role;

    #[test]
    fn test_unauthenticated_lands_on_login() {
        let (_dir, session) = empty_session();
        let nav = Navigator::new(session).navigate("/admin/dashboard");

        assert_eq!(nav.destination.path, paths::LOGIN);
        assert_eq!(nav.redirects, vec![paths::LOGIN]);
        assert!(!nav.reached_target());
    }

    #[test]
    fn test_staff_reaches_dashboard() {
        let (_dir, session) = authenticated_session(Role::Support);
        let nav = Navigator::new(session).navigate("/admin/dashboard");

        assert_eq!(nav.destination.path, paths::ADMIN_DASHBOARD);
        assert!(nav.reached_target());
    }

    #[test]
    fn test_support_denied_management_screen() {
        let (_dir, session) = authenticated_session(Role::Support);
        let nav = Navigator::new(session).navigate("/admin/users");

        assert_eq!(nav.destination.path, paths::UNAUTHORIZED);
        assert!(!nav.reached_target());
    }

    #[test]
    fn test_authenticated_staff_bounced_off_login() {
        let (_dir, session) = authenticated_session(Role::Admin);
        let nav = Navigator::new(session).navigate("/auth/login");

        // Guest guard bounces to the admin area, which then admits the user.
        assert_eq!(nav.destination.path, paths::ADMIN_HOME);
        assert_eq!(nav.redirects, vec![paths::ADMIN_HOME]);
    }

    #[test]
    fn test_forced_password_change_chain() {
        let (_dir, session) = empty_session();
        session
            .establish(
                &token_expiring_at(crate::session::tests::far_future()),
                sample_user(Role::Admin),
                true,
            )
            .unwrap();

        let nav = Navigator::new(session).navigate("/admin/dashboard");
        assert_eq!(nav.destination.path, paths::CHANGE_PASSWORD);
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let (_dir, session) = empty_session();
        let nav = Navigator::new(session).navigate("/no/such/screen");
        assert_eq!(nav.destination.path, paths::NOT_FOUND);
    }

    #[test]
    fn test_navigation_is_stable_for_unchanged_session() {
        let (_dir, session) = authenticated_session(Role::Support);
        let navigator = Navigator::new(session);

        let first = navigator.navigate("/admin/complaints");
        let second = navigator.navigate("/admin/complaints");
        assert_eq!(first.destination.path, second.destination.path);
        assert_eq!(first.redirects, second.redirects);
    }
}
