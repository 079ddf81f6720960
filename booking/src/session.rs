//! Authenticated session context for the booking flow.
//!
//! Roles are a closed set with exhaustive dispatch to their endpoints and
//! redirect paths, and the session is an explicitly passed context object
//! (initialized at sign-in, torn down at sign-out) rather than ambient
//! state read from storage inside arbitrary components.

use crate::error::BookingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::pin::Pin;

/// The roles the marketplace authenticates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Ticket buyer
    Customer,
    /// Event organizer
    Organizer,
    /// Marketplace administrator
    Admin,
    /// Entrance scanning device credential
    ScanPoint,
}

impl Role {
    /// Endpoint used to sign in as this role
    #[must_use]
    pub const fn login_endpoint(&self) -> &'static str {
        match self {
            Self::Customer => "/customer/login",
            Self::Organizer => "/organizer/login",
            Self::Admin => "/admin/login",
            Self::ScanPoint => "/scan-point/login",
        }
    }

    /// Endpoint used to fetch this role's profile
    #[must_use]
    pub const fn profile_endpoint(&self) -> &'static str {
        match self {
            Self::Customer => "/customer/profile",
            Self::Organizer => "/organizer/profile",
            Self::Admin => "/admin/profile",
            Self::ScanPoint => "/scan-point/profile",
        }
    }

    /// Where the app navigates after sign-in
    #[must_use]
    pub const fn redirect_path(&self) -> &'static str {
        match self {
            Self::Customer => "/",
            Self::Organizer => "/organizer/dashboard",
            Self::Admin => "/admin/dashboard",
            Self::ScanPoint => "/scan",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Customer => "customer",
            Self::Organizer => "organizer",
            Self::Admin => "admin",
            Self::ScanPoint => "scan-point",
        };
        f.write_str(tag)
    }
}

/// An authenticated session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Role the token was issued for
    pub role: Role,
    /// Bearer token presented on API calls
    pub token: String,
    /// Display name of the signed-in account
    pub display_name: String,
}

impl Session {
    /// Require this session to carry the given role.
    ///
    /// The booking wizard demands `authorize(Role::Customer)`; a mismatch
    /// names the required role's sign-in endpoint so the caller can redirect.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::Validation`] when the roles do not match.
    pub fn authorize(&self, required: Role) -> Result<(), BookingError> {
        if self.role == required {
            Ok(())
        } else {
            Err(BookingError::Validation(format!(
                "signed in as {}, requires {}; sign in at {}",
                self.role,
                required,
                required.login_endpoint()
            )))
        }
    }
}

/// Identity provider trait
///
/// A single whoami capability returning the role explicitly, instead of
/// probing profile endpoints one by one and guessing from which call
/// succeeds.
pub trait IdentityProvider: Send + Sync {
    /// Resolve the current session, if any
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`]: no session; caller redirects to sign-in
    /// - [`BookingError::Api`]: transport failure
    fn whoami(&self) -> Pin<Box<dyn Future<Output = Result<Session, BookingError>> + Send>>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn role_dispatch_is_exhaustive() {
        let roles = [Role::Customer, Role::Organizer, Role::Admin, Role::ScanPoint];
        for role in roles {
            assert!(role.login_endpoint().ends_with("/login"));
            assert!(role.profile_endpoint().ends_with("/profile"));
            assert!(role.redirect_path().starts_with('/'));
        }
    }

    #[test]
    fn role_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Role::ScanPoint).unwrap();
        assert_eq!(json, "\"scan-point\"");
    }

    #[test]
    fn non_customer_session_is_rejected() {
        let session = Session {
            role: Role::Organizer,
            token: "t".to_string(),
            display_name: "Org".to_string(),
        };
        assert!(session.authorize(Role::Customer).is_err());
        assert!(session.authorize(Role::Organizer).is_ok());
    }
}
