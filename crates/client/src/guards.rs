//! Navigation guard policy.
//!
//! Guards are pure functions over the session and the target screen: they
//! return a decision value and never navigate themselves. The single place a
//! redirect is acted on is [`crate::nav::Navigator`], which keeps the policy
//! testable independently of any dispatch mechanism.

use aos_micepp_core::Role;

use crate::routes::{Access, ScreenSpec, paths};
use crate::session::Session;

/// Outcome of a guard check. A denial always names where to go instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Deny { redirect: &'static str },
}

impl GuardDecision {
    /// Whether the navigation may proceed to its target.
    #[must_use]
    pub const fn is_allow(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The redirect target of a denial.
    #[must_use]
    pub const fn redirect(&self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::Deny { redirect } => Some(redirect),
        }
    }
}

/// Gate for screens inside the authenticated area.
///
/// In order:
/// 1. unauthenticated sessions are sent to the login screen;
/// 2. a pending forced password change sends everything except the
///    change-password screen itself to that screen (the exception prevents a
///    redirect loop);
/// 3. a role requirement the current identity does not meet ends on the
///    unauthorized screen;
/// 4. otherwise the navigation may proceed.
#[must_use]
pub fn protected_area(session: &Session, target: &ScreenSpec) -> GuardDecision {
    if !session.is_authenticated() {
        return GuardDecision::Deny {
            redirect: paths::LOGIN,
        };
    }

    if session.must_change_password() && target.path != paths::CHANGE_PASSWORD {
        return GuardDecision::Deny {
            redirect: paths::CHANGE_PASSWORD,
        };
    }

    if let Access::Protected(required) = target.access
        && !session.has_any_role(required)
    {
        return GuardDecision::Deny {
            redirect: paths::UNAUTHORIZED,
        };
    }

    GuardDecision::Allow
}

/// Gate for guest-only screens (login and the like).
///
/// An authenticated visitor is sent back into the application: staff roles
/// land in the admin area, anything else on the site root.
#[must_use]
pub fn guest_only(session: &Session) -> GuardDecision {
    if !session.is_authenticated() {
        return GuardDecision::Allow;
    }

    let redirect = match session.current_user().map(|user| user.role) {
        Some(Role::Admin | Role::Support) => paths::ADMIN_HOME,
        _ => paths::ROOT,
    };
    GuardDecision::Deny { redirect }
}
