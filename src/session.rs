use crate::model::User;


// Coarse UI state. Everything except the auth/profile panel renders the same in both states.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn(User),
}

impl Session {
    pub fn from_user(user: Option<User>) -> Self {
        match user {
            Some(user) => Session::LoggedIn(user),
            None => Session::LoggedOut,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::LoggedOut => None,
            Session::LoggedIn(user) => Some(user),
        }
    }
    pub fn user_name(&self) -> Option<&str> { self.user().map(|user| user.username.as_str()) }
    pub fn is_logged_in(&self) -> bool { matches!(self, Session::LoggedIn(_)) }

    // Text for the profile panel; empty when logged out.
    pub fn user_info_text(&self) -> String {
        match self.user_name() {
            Some(name) => format!("Logged in as {name}"),
            None => String::new(),
        }
    }
}
