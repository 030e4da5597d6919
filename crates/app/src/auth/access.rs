//! Role and ownership checks.

use thiserror::Error;

use crate::{auth::Identity, domain::users::records::UserUuid};

/// The caller is authenticated but not allowed to do this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("access denied")]
pub struct AccessDenied;

/// Only admins pass.
///
/// # Errors
///
/// Returns [`AccessDenied`] for any non-admin identity.
pub fn authorize_admin(identity: &Identity) -> Result<(), AccessDenied> {
    if identity.is_admin() {
        Ok(())
    } else {
        Err(AccessDenied)
    }
}

/// The owner of a resource, or any admin, passes.
///
/// # Errors
///
/// Returns [`AccessDenied`] when the identity neither owns the resource nor is
/// an admin.
pub fn authorize_owner_or_admin(identity: &Identity, owner: UserUuid) -> Result<(), AccessDenied> {
    if identity.user == owner || identity.is_admin() {
        Ok(())
    } else {
        Err(AccessDenied)
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::users::records::Role;

    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            user: UserUuid::new(),
            role,
        }
    }

    #[test]
    fn admin_passes_admin_check() {
        assert_eq!(authorize_admin(&identity(Role::Admin)), Ok(()));
    }

    #[test]
    fn customer_fails_admin_check() {
        assert_eq!(authorize_admin(&identity(Role::Customer)), Err(AccessDenied));
    }

    #[test]
    fn owner_passes_ownership_check() {
        let customer = identity(Role::Customer);

        assert_eq!(authorize_owner_or_admin(&customer, customer.user), Ok(()));
    }

    #[test]
    fn admin_passes_ownership_check_for_any_owner() {
        assert_eq!(
            authorize_owner_or_admin(&identity(Role::Admin), UserUuid::new()),
            Ok(())
        );
    }

    #[test]
    fn other_customer_fails_ownership_check() {
        assert_eq!(
            authorize_owner_or_admin(&identity(Role::Customer), UserUuid::new()),
            Err(AccessDenied)
        );
    }
}
