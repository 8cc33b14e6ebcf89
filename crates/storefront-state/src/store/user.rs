//! User slice: the signed-in session and the admin user list.

use storefront_commerce::account::User;
use storefront_commerce::ids::UserId;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserSlice {
    /// The signed-in user, token included.
    pub user_info: Option<User>,
    /// Admin user list.
    pub users: Vec<User>,
    /// User on the admin edit screen.
    pub selected: Option<User>,
    pub loading: bool,
    pub error: Option<String>,
    /// Set after a profile or admin user update succeeds.
    pub success: bool,
}

impl UserSlice {
    pub fn is_signed_in(&self) -> bool {
        self.user_info.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user_info.as_ref().is_some_and(|u| u.is_admin)
    }

    pub fn token(&self) -> Option<&str> {
        self.user_info.as_ref().and_then(User::bearer)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    Pending,
    /// Login or registration succeeded.
    SessionFulfilled(User),
    /// Profile fetched or updated; the session token is kept when the server omits it.
    ProfileFulfilled { user: User, updated: bool },
    UsersFulfilled(Vec<User>),
    UserFulfilled(User),
    UserUpdated(User),
    UserDeleted(UserId),
    Rejected(String),
    DismissError,
    ResetSuccess,
}

pub fn reduce(slice: &mut UserSlice, action: UserAction) {
    match action {
        UserAction::Pending => {
            slice.loading = true;
            slice.error = None;
        }
        UserAction::SessionFulfilled(user) => {
            slice.loading = false;
            slice.user_info = Some(user);
        }
        UserAction::ProfileFulfilled { mut user, updated } => {
            slice.loading = false;
            if user.token.is_none() {
                user.token = slice.user_info.as_ref().and_then(|u| u.token.clone());
            }
            slice.user_info = Some(user);
            slice.success = updated;
        }
        UserAction::UsersFulfilled(users) => {
            slice.loading = false;
            slice.users = users;
        }
        UserAction::UserFulfilled(user) => {
            slice.loading = false;
            slice.selected = Some(user);
        }
        UserAction::UserUpdated(user) => {
            slice.loading = false;
            slice.success = true;
            if let Some(existing) = slice.users.iter_mut().find(|u| u.id == user.id) {
                *existing = user.clone();
            }
            slice.selected = Some(user);
        }
        UserAction::UserDeleted(id) => {
            slice.loading = false;
            slice.success = true;
            slice.users.retain(|u| u.id != id);
            if slice.selected.as_ref().is_some_and(|u| u.id == id) {
                slice.selected = None;
            }
        }
        UserAction::Rejected(message) => {
            slice.loading = false;
            slice.error = Some(message);
        }
        UserAction::DismissError => slice.error = None,
        UserAction::ResetSuccess => slice.success = false,
    }
}
