use clap::Args;
use storefront_app::{
    auth::{
        AuthService, AuthServiceError, DEFAULT_TOKEN_TTL_HOURS, PgAuthService, TokenIssuer,
        TokenSigner,
    },
    database::{self, Db},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct RevokeTokenArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Server-side token signing secret
    #[arg(long, env = "AUTH_TOKEN_SECRET", hide_env_values = true)]
    token_secret: String,

    /// Token UUID to revoke
    #[arg(long)]
    token_uuid: Uuid,
}

pub(crate) async fn run(args: RevokeTokenArgs) -> Result<(), String> {
    let signer = TokenSigner::new(args.token_secret.as_bytes())
        .map_err(|error| format!("invalid token secret: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let db = Db::new(pool);
    let service = PgAuthService::new(
        db.clone(),
        TokenIssuer::new(signer, DEFAULT_TOKEN_TTL_HOURS),
    );

    let result = service.revoke_token(args.token_uuid).await;

    db.close().await;

    match result {
        Ok(()) => println!("revoked token {}", args.token_uuid),
        Err(AuthServiceError::NotFound) => println!("token {} was not active", args.token_uuid),
        Err(error) => return Err(format!("failed to revoke token: {error}")),
    }

    Ok(())
}
