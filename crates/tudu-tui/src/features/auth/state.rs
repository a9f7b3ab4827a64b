//! Auth form state.

use crate::common::TextField;
use crate::route::Screen;

/// Which auth request a submission maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    /// The mode shown on a given screen, if it is an auth screen.
    pub fn from_screen(screen: Screen) -> Option<Self> {
        match screen {
            Screen::Login => Some(AuthMode::Login),
            Screen::Signup => Some(AuthMode::Signup),
            Screen::Dashboard => None,
        }
    }

    pub fn screen(self) -> Screen {
        match self {
            AuthMode::Login => Screen::Login,
            AuthMode::Signup => Screen::Signup,
        }
    }

    /// The other auth screen (Ctrl+S toggle target).
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Signup,
            AuthMode::Signup => AuthMode::Login,
        }
    }
}

/// Form fields, in tab order per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Name,
    Email,
    Password,
}

impl AuthField {
    /// Tab order for a mode. Signup leads with the optional name.
    pub fn order(mode: AuthMode) -> &'static [AuthField] {
        match mode {
            AuthMode::Login => &[AuthField::Email, AuthField::Password],
            AuthMode::Signup => &[AuthField::Name, AuthField::Email, AuthField::Password],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AuthField::Name => "Name",
            AuthField::Email => "Email",
            AuthField::Password => "Password",
        }
    }
}

/// State of the login/signup form.
#[derive(Debug)]
pub struct AuthState {
    pub email: TextField,
    pub password: TextField,
    pub name: TextField,
    pub focus: AuthField,
    /// Inline error shown under the form.
    pub error: Option<String>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            email: TextField::new(),
            password: TextField::new_masked(),
            name: TextField::new(),
            focus: AuthField::Email,
            error: None,
        }
    }

    /// Clears the form (screen switches, logout, successful auth).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn field_mut(&mut self, field: AuthField) -> &mut TextField {
        match field {
            AuthField::Name => &mut self.name,
            AuthField::Email => &mut self.email,
            AuthField::Password => &mut self.password,
        }
    }

    pub fn field(&self, field: AuthField) -> &TextField {
        match field {
            AuthField::Name => &self.name,
            AuthField::Email => &self.email,
            AuthField::Password => &self.password,
        }
    }

    pub fn focused_mut(&mut self) -> &mut TextField {
        self.field_mut(self.focus)
    }

    /// Moves focus forward or backward in the mode's tab order.
    pub fn cycle_focus(&mut self, mode: AuthMode, backward: bool) {
        let order = AuthField::order(mode);
        let idx = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if backward {
            (idx + order.len() - 1) % order.len()
        } else {
            (idx + 1) % order.len()
        };
        self.focus = order[next];
    }

    /// Snaps focus onto a field that exists in this mode.
    pub fn ensure_focus(&mut self, mode: AuthMode) {
        if !AuthField::order(mode).contains(&self.focus) {
            self.focus = AuthField::order(mode)[0];
        }
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_through_mode_order() {
        let mut auth = AuthState::new();
        assert_eq!(auth.focus, AuthField::Email);

        auth.cycle_focus(AuthMode::Login, false);
        assert_eq!(auth.focus, AuthField::Password);
        auth.cycle_focus(AuthMode::Login, false);
        assert_eq!(auth.focus, AuthField::Email);

        auth.cycle_focus(AuthMode::Login, true);
        assert_eq!(auth.focus, AuthField::Password);
    }

    #[test]
    fn ensure_focus_snaps_to_valid_field() {
        let mut auth = AuthState::new();
        auth.focus = AuthField::Name;
        auth.ensure_focus(AuthMode::Login);
        assert_eq!(auth.focus, AuthField::Email);
    }
}
