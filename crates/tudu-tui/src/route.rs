//! Screen routing.
//!
//! Every navigation — including the startup screen choice — passes
//! through [`guard`], which gates screens on token *presence* only.
//! Token validity is a separate concern settled by the session-restore
//! flow; this is a UX redirect, not a security boundary.

/// The screens the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Signup,
    Dashboard,
}

impl Screen {
    /// Returns true for the login and signup screens.
    pub fn is_auth(self) -> bool {
        matches!(self, Screen::Login | Screen::Signup)
    }
}

/// Applies the navigation guard to a requested screen.
///
/// - auth screens with a token present redirect to the dashboard
/// - the dashboard without a token redirects to login
/// - anything else passes through unchanged
pub fn guard(requested: Screen, has_token: bool) -> Screen {
    match requested {
        Screen::Login | Screen::Signup if has_token => Screen::Dashboard,
        Screen::Dashboard if !has_token => Screen::Login,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_without_token_redirects_to_login() {
        assert_eq!(guard(Screen::Dashboard, false), Screen::Login);
    }

    #[test]
    fn auth_screens_with_token_redirect_to_dashboard() {
        assert_eq!(guard(Screen::Login, true), Screen::Dashboard);
        assert_eq!(guard(Screen::Signup, true), Screen::Dashboard);
    }

    #[test]
    fn allowed_screens_pass_through() {
        assert_eq!(guard(Screen::Login, false), Screen::Login);
        assert_eq!(guard(Screen::Signup, false), Screen::Signup);
        assert_eq!(guard(Screen::Dashboard, true), Screen::Dashboard);
    }
}
