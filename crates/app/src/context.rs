//! App Context

use std::sync::Arc;

use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::{
    auth::{AuthService, PgAuthService, TokenIssuer, TokenSigner},
    database::{self, Db},
    domain::{
        catalog::{CatalogService, PgCatalogService},
        orders::{OrdersService, PgOrdersService},
        users::{PgUsersService, UsersService},
    },
};

/// Startup failures.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The database could not be reached.
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    /// A migration failed to apply.
    #[error("failed to apply database migrations")]
    Migrate(#[source] MigrateError),
}

/// Token issuing settings shared by every request.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Computes token verifiers.
    pub signer: TokenSigner,

    /// Lifetime of newly issued tokens.
    pub token_ttl_hours: u16,
}

/// Every service the HTTP layer talks to, built over one shared pool.
#[derive(Clone)]
pub struct AppContext {
    /// Accounts and roles.
    pub users: Arc<dyn UsersService>,

    /// Bearer tokens.
    pub auth: Arc<dyn AuthService>,

    /// Categories and products.
    pub catalog: Arc<dyn CatalogService>,

    /// Orders.
    pub orders: Arc<dyn OrdersService>,

    db: Db,
}

impl AppContext {
    /// Connect, bring the schema up to date and build the services.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable or a migration fails.
    pub async fn from_database_url(
        url: &str,
        max_connections: u32,
        auth: AuthSettings,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect_with(url, max_connections)
            .await
            .map_err(AppInitError::Database)?;

        database::migrate(&pool)
            .await
            .map_err(AppInitError::Migrate)?;

        Ok(Self::from_db(Db::new(pool), auth))
    }

    /// Build the services over an existing handle.
    #[must_use]
    pub fn from_db(db: Db, auth: AuthSettings) -> Self {
        let issuer = TokenIssuer::new(auth.signer, auth.token_ttl_hours);

        Self {
            users: Arc::new(PgUsersService::new(db.clone(), issuer.clone())),
            auth: Arc::new(PgAuthService::new(db.clone(), issuer)),
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db.clone())),
            db,
        }
    }

    /// Close the connection pool once in-flight queries finish.
    pub async fn close(&self) {
        self.db.close().await;
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").field("db", &self.db).finish_non_exhaustive()
    }
}
