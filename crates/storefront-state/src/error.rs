//! State container errors.

use storefront_commerce::CommerceError;
use storefront_data::FetchError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// A remote call failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Local validation rejected the action.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The action needs a signed-in session.
    #[error("Please sign in to continue")]
    NotSignedIn,

    /// The action needs an admin session.
    #[error("Admin access required")]
    Forbidden,

    /// A newer request of the same kind superseded this one.
    #[error("Response superseded by a newer request")]
    Superseded,
}

impl StateError {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            StateError::Fetch(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_delegates_to_fetch_error() {
        let err = StateError::from(FetchError::Timeout);
        assert_eq!(err.user_message(), FetchError::Timeout.user_message());
        assert_eq!(StateError::NotSignedIn.user_message(), "Please sign in to continue");
    }

    #[test]
    fn test_commerce_error_passes_through() {
        let err = StateError::from(CommerceError::SizeNotSelected);
        assert_eq!(err.to_string(), "Please select a size");
    }
}
