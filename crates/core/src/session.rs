//! Session guards for the dashboard and the login page.
//!
//! Authentication itself belongs to an external provider. The core only asks
//! it whether a user is signed in and whether that answer is still loading,
//! and decides what a page should do.

use serde::{Deserialize, Serialize};

use rodabem_shared::types::UserId;

/// Signed-in user as reported by the auth provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID.
    pub id: UserId,
    /// Display name.
    pub display_name: String,
    /// Login email.
    pub email: String,
}

/// Auth collaborator contract.
pub trait AuthProvider: Send + Sync {
    /// The signed-in user, if any.
    fn current_user(&self) -> Option<SessionUser>;

    /// Whether the session is still being resolved.
    fn is_loading(&self) -> bool;
}

/// What a guarded page should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardDecision {
    /// Session still resolving.
    Spinner,
    /// No session; go to the login page.
    RedirectToLogin,
    /// Already signed in; go to the dashboard root.
    RedirectToRoot,
    /// Render the page.
    Render,
}

impl GuardDecision {
    /// Route to navigate to, for redirects.
    #[must_use]
    pub const fn redirect_target(&self) -> Option<&'static str> {
        match self {
            Self::RedirectToLogin => Some(SessionGuard::LOGIN_ROUTE),
            Self::RedirectToRoot => Some(SessionGuard::ROOT_ROUTE),
            Self::Spinner | Self::Render => None,
        }
    }
}

/// Page guards.
pub struct SessionGuard;

impl SessionGuard {
    /// Login page route.
    pub const LOGIN_ROUTE: &'static str = "/auth";
    /// Dashboard root route.
    pub const ROOT_ROUTE: &'static str = "/";

    /// Guard for the dashboard: only signed-in users see it.
    pub fn dashboard(provider: &dyn AuthProvider) -> GuardDecision {
        if provider.is_loading() {
            GuardDecision::Spinner
        } else if provider.current_user().is_none() {
            GuardDecision::RedirectToLogin
        } else {
            GuardDecision::Render
        }
    }

    /// Guard for the login page: signed-in users are sent to the dashboard.
    pub fn auth_page(provider: &dyn AuthProvider) -> GuardDecision {
        if provider.is_loading() {
            GuardDecision::Spinner
        } else if provider.current_user().is_some() {
            GuardDecision::RedirectToRoot
        } else {
            GuardDecision::Render
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct FixedProvider {
        user: Option<SessionUser>,
        loading: bool,
    }

    impl AuthProvider for FixedProvider {
        fn current_user(&self) -> Option<SessionUser> {
            self.user.clone()
        }

        fn is_loading(&self) -> bool {
            self.loading
        }
    }

    fn provider(signed_in: bool, loading: bool) -> FixedProvider {
        let user = signed_in.then(|| SessionUser {
            id: UserId::new(),
            display_name: "Ana Souza".into(),
            email: "ana@rodabem.tur.br".into(),
        });
        FixedProvider { user, loading }
    }

    #[rstest]
    #[case(false, true, GuardDecision::Spinner)]
    #[case(true, true, GuardDecision::Spinner)]
    #[case(false, false, GuardDecision::RedirectToLogin)]
    #[case(true, false, GuardDecision::Render)]
    fn test_dashboard_guard(
        #[case] signed_in: bool,
        #[case] loading: bool,
        #[case] expected: GuardDecision,
    ) {
        assert_eq!(SessionGuard::dashboard(&provider(signed_in, loading)), expected);
    }

    #[rstest]
    #[case(false, true, GuardDecision::Spinner)]
    #[case(true, true, GuardDecision::Spinner)]
    #[case(false, false, GuardDecision::Render)]
    #[case(true, false, GuardDecision::RedirectToRoot)]
    fn test_auth_page_guard(
        #[case] signed_in: bool,
        #[case] loading: bool,
        #[case] expected: GuardDecision,
    ) {
        assert_eq!(SessionGuard::auth_page(&provider(signed_in, loading)), expected);
    }

    #[test]
    fn test_redirect_targets() {
        assert_eq!(GuardDecision::RedirectToLogin.redirect_target(), Some("/auth"));
        assert_eq!(GuardDecision::RedirectToRoot.redirect_target(), Some("/"));
        assert_eq!(GuardDecision::Render.redirect_target(), None);
    }
}
