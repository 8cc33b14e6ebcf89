//! Login, registration and profile forms with their local validation.

use crate::account::Address;
use crate::error::CommerceError;
use serde::{Deserialize, Serialize};

/// Minimum length of a new password on the profile screen.
pub const MIN_PASSWORD_LEN: usize = 6;

const PASSWORD_MISMATCH: &str = "Passwords do not match";

/// Body of `POST /api/users/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), CommerceError> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(CommerceError::Validation("Email and password are required".into()));
        }
        Ok(())
    }
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// The registration screen's fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    /// Check the form and produce the request body. Nothing is sent on failure.
    pub fn validate(&self) -> Result<RegisterRequest, CommerceError> {
        if self.password != self.confirm_password {
            return Err(CommerceError::Validation(PASSWORD_MISMATCH.into()));
        }
        if self.name.trim().is_empty() {
            return Err(CommerceError::Validation("Name is required".into()));
        }
        if self.email.trim().is_empty() {
            return Err(CommerceError::Validation("Email is required".into()));
        }
        if self.password.is_empty() {
            return Err(CommerceError::Validation("Password is required".into()));
        }

        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Body of `PUT /api/users/profile` and `PUT /api/users/:id`.
///
/// Only present fields are changed on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Admin edit only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

/// The password section of the profile screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordChange {
    pub new_password: String,
    pub confirm_password: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<ProfileUpdate, CommerceError> {
        if self.new_password != self.confirm_password {
            return Err(CommerceError::Validation(PASSWORD_MISMATCH.into()));
        }
        if self.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CommerceError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(ProfileUpdate {
            password: Some(self.new_password.clone()),
            ..ProfileUpdate::default()
        })
    }
}
