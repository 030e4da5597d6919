//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};

use storefront_app::auth::Identity;

/// Typed access to values the middleware stack stores in the depot.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_identity(&mut self, identity: Identity);

    /// The caller resolved by the auth middleware.
    fn identity_or_401(&self) -> Result<Identity, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_identity(&mut self, identity: Identity) {
        self.inject(identity);
    }

    fn identity_or_401(&self) -> Result<Identity, StatusError> {
        self.obtain::<Identity>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;
    use storefront_app::domain::users::records::{Role, UserUuid};

    use super::*;

    #[test]
    fn identity_round_trips_through_depot() {
        let identity = Identity {
            user: UserUuid::new(),
            role: Role::Customer,
        };

        let mut depot = Depot::new();

        depot.insert_identity(identity);

        assert_eq!(depot.identity_or_401().ok(), Some(identity));
    }

    #[test]
    fn missing_identity_is_unauthorized() {
        let depot = Depot::new();

        let error = depot.identity_or_401().err();

        assert_eq!(error.map(|error| error.code), Some(StatusCode::UNAUTHORIZED));
    }
}
