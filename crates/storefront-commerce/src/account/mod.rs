//! Accounts module: users, roles, the account forms and avatar uploads.

mod avatar;
mod forms;
mod user;

pub use avatar::{AvatarUpload, MAX_AVATAR_BYTES};
pub use forms::{LoginRequest, PasswordChange, ProfileUpdate, RegisterRequest, RegistrationForm, MIN_PASSWORD_LEN};
pub use user::{Address, Role, User, UserFilter};
