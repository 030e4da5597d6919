//! State

use std::{fmt, sync::Arc};

use storefront_app::{
    auth::AuthService,
    context::AppContext,
    domain::{catalog::CatalogService, orders::OrdersService, users::UsersService},
};

/// Services shared by every handler, injected into the depot once per router.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) users: Arc<dyn UsersService>,
    pub(crate) auth: Arc<dyn AuthService>,
    pub(crate) catalog: Arc<dyn CatalogService>,
    pub(crate) orders: Arc<dyn OrdersService>,
}

impl State {
    #[must_use]
    pub(crate) fn new(
        users: Arc<dyn UsersService>,
        auth: Arc<dyn AuthService>,
        catalog: Arc<dyn CatalogService>,
        orders: Arc<dyn OrdersService>,
    ) -> Self {
        Self {
            users,
            auth,
            catalog,
            orders,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: &AppContext) -> Arc<Self> {
        Arc::new(Self::new(
            Arc::clone(&app.users),
            Arc::clone(&app.auth),
            Arc::clone(&app.catalog),
            Arc::clone(&app.orders),
        ))
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State").finish_non_exhaustive()
    }
}
