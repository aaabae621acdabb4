//! The screen table.
//!
//! Every navigable screen of the platform, with the access rule the
//! navigation layer enforces before entering it. Role requirements are
//! flattened: a child screen lists the effective roles of its whole route
//! chain (the admin area itself admits ADMIN and SUPPORT, management screens
//! inside it admit ADMIN only).

use aos_micepp_core::Role;

/// Well-known screen paths.
pub mod paths {
    pub const ROOT: &str = "/";
    pub const LOGIN: &str = "/auth/login";
    pub const CHANGE_PASSWORD: &str = "/auth/change-password";
    pub const ADMIN_HOME: &str = "/admin";
    pub const ADMIN_DASHBOARD: &str = "/admin/dashboard";
    pub const ADMIN_USERS: &str = "/admin/users";
    pub const ADMIN_REQUESTS: &str = "/admin/requests";
    pub const ADMIN_MY_REQUESTS: &str = "/admin/my-requests";
    pub const ADMIN_COMPLAINTS: &str = "/admin/complaints";
    pub const ADMIN_MY_COMPLAINTS: &str = "/admin/my-complaints";
    pub const ADMIN_CONTACT: &str = "/admin/contact";
    pub const ADMIN_SERVICES: &str = "/admin/services";
    pub const ADMIN_NEWS: &str = "/admin/news";
    pub const UNAUTHORIZED: &str = "/unauthorized";
    pub const NOT_FOUND: &str = "/404";
}

/// Who may enter a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Anyone, authenticated or not.
    Public,
    /// Authenticated users holding any of the listed roles (an empty list
    /// means any authenticated user).
    Protected(&'static [Role]),
    /// Unauthenticated visitors only (the login screen).
    GuestOnly,
}

/// One entry of the screen table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSpec {
    /// Path pattern; segments starting with `:` match any value.
    pub path: &'static str,
    pub access: Access,
}

const ADMIN_AREA: &[Role] = &[Role::Admin, Role::Support];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// The full screen table.
pub static ROUTES: &[ScreenSpec] = &[
    ScreenSpec {
        path: paths::ROOT,
        access: Access::Public,
    },
    ScreenSpec {
        path: paths::LOGIN,
        access: Access::GuestOnly,
    },
    ScreenSpec {
        path: paths::CHANGE_PASSWORD,
        access: Access::Protected(&[]),
    },
    ScreenSpec {
        path: paths::ADMIN_HOME,
        access: Access::Protected(ADMIN_AREA),
    },
    ScreenSpec {
        path: paths::ADMIN_DASHBOARD,
        access: Access::Protected(ADMIN_AREA),
    },
    ScreenSpec {
        path: paths::ADMIN_USERS,
        access: Access::Protected(ADMIN_ONLY),
    },
    ScreenSpec {
        path: "/admin/users/add",
        access: Access::Protected(ADMIN_ONLY),
    },
    ScreenSpec {
        path: "/admin/users/:id",
        access: Access::Protected(ADMIN_ONLY),
    },
    ScreenSpec {
        path: paths::ADMIN_REQUESTS,
        access: Access::Protected(ADMIN_ONLY),
    },
    ScreenSpec {
        path: "/admin/requests/:id",
        access: Access::Protected(ADMIN_AREA),
    },
    ScreenSpec {
        path: paths::ADMIN_MY_REQUESTS,
        access: Access::Protected(ADMIN_AREA),
    },
    ScreenSpec {
        path: paths::ADMIN_COMPLAINTS,
        access: Access::Protected(ADMIN_ONLY),
    },
    ScreenSpec {
        path: "/admin/complaints/:id",
        access: Access::Protected(ADMIN_ONLY),
    },
    ScreenSpec {
        path: paths::ADMIN_MY_COMPLAINTS,
        access: Access::Protected(ADMIN_AREA),
    },
    ScreenSpec {
        path: paths::ADMIN_CONTACT,
        access: Access::Protected(ADMIN_AREA),
    },
    ScreenSpec {
        path: paths::ADMIN_SERVICES,
        access: Access::Protected(ADMIN_ONLY),
    },
    ScreenSpec {
        path: paths::ADMIN_NEWS,
        access: Access::Protected(ADMIN_ONLY),
    },
    ScreenSpec {
        path: paths::UNAUTHORIZED,
        access: Access::Public,
    },
    ScreenSpec {
        path: paths::NOT_FOUND,
        access: Access::Public,
    },
];

/// Resolve a concrete path against the screen table.
///
/// Returns `None` for paths no screen matches (the navigation layer sends
/// those to the not-found screen).
#[must_use]
pub fn resolve(path: &str) -> Option<&'static ScreenSpec> {
    ROUTES.iter().find(|spec| matches_pattern(spec.path, path))
}

static NOT_FOUND_SCREEN: ScreenSpec = ScreenSpec {
    path: paths::NOT_FOUND,
    access: Access::Public,
};

/// The not-found screen.
#[must_use]
pub fn not_found() -> &'static ScreenSpec {
    &NOT_FOUND_SCREEN
}

fn matches_pattern(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.trim_matches('/').split('/');
    let mut path_segments = path.trim_matches('/').split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(p), Some(s)) => {
                if p.starts_with(':') {
                    if s.is_empty() {
                        return false;
                    }
                } else if p != s {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_exact() {
        let spec = resolve("/auth/login").unwrap();
        assert_eq!(spec.access, Access::GuestOnly);
    }

    #[test]
    fn test_resolve_with_parameter() {
        let spec = resolve("/admin/users/42").unwrap();
        assert_eq!(spec.path, "/admin/users/:id");
        assert_eq!(spec.access, Access::Protected(&[Role::Admin]));
    }

    #[test]
    fn test_static_segment_beats_parameter() {
        // /admin/users/add is its own screen, not a user id.
        let spec = resolve("/admin/users/add").unwrap();
        assert_eq!(spec.path, "/admin/users/add");
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(resolve("/nowhere").is_none());
        assert!(resolve("/admin/users/42/extra").is_none());
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        assert!(resolve("/admin/dashboard/").is_some());
    }

    #[test]
    fn test_admin_area_roles() {
        let dashboard = resolve("/admin/dashboard").unwrap();
        assert_eq!(
            dashboard.access,
            Access::Protected(&[Role::Admin, Role::Support])
        );

        let users = resolve("/admin/users").unwrap();
        assert_eq!(users.access, Access::Protected(&[Role::Admin]));
    }

    #[test]
    fn test_change_password_requires_no_role() {
        let spec = resolve("/auth/change-password").unwrap();
        assert_eq!(spec.access, Access::Protected(&[]));
    }

    #[test]
    fn test_not_found_screen_exists() {
        assert_eq!(not_found().path, paths::NOT_FOUND);
    }
}
