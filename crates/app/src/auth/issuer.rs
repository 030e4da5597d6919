//! Token issuing on a caller-owned transaction.

use std::sync::Arc;

use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenSecret, ApiTokenVersion, AuthServiceError, IssuedApiToken, NewApiToken,
        ParsedApiToken, TokenSigner, repository::PgAuthRepository,
    },
    domain::users::records::UserUuid,
};

/// Mints bearer tokens and stores their verifiers.
///
/// Used by the auth service and by registration.
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    repository: PgAuthRepository,
    signer: Arc<TokenSigner>,
    token_ttl_hours: u16,
}

impl TokenIssuer {
    /// Issuer signing with `signer` whose tokens live for `token_ttl_hours`.
    #[must_use]
    pub fn new(signer: TokenSigner, token_ttl_hours: u16) -> Self {
        Self {
            repository: PgAuthRepository::new(),
            signer: Arc::new(signer),
            token_ttl_hours,
        }
    }

    pub(crate) fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    /// Writes a fresh token for `user` into `tx`. Nothing is visible until the
    /// caller commits.
    pub(crate) async fn issue(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let parsed = ParsedApiToken {
            token_uuid: Uuid::now_v7(),
            version: ApiTokenVersion::V1,
            secret: ApiTokenSecret::generate(),
        };

        let token_hash = self.signer.sign(&parsed.verifier_input(user))?;

        let metadata = self
            .repository
            .create_api_token(
                tx,
                NewApiToken {
                    uuid: parsed.token_uuid,
                    user_uuid: user,
                    version: parsed.version,
                    token_hash,
                    ttl_hours: i32::from(self.token_ttl_hours),
                },
            )
            .await?;

        Ok(IssuedApiToken {
            token: parsed.format(),
            metadata,
        })
    }
}
