use clap::Args;
use storefront_app::{
    auth::{DEFAULT_TOKEN_TTL_HOURS, TokenIssuer, TokenSigner},
    database::{self, Db},
    domain::users::{PgUsersService, UsersService, UsersServiceError},
};

#[derive(Debug, Args)]
pub(crate) struct PromoteUserArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,

    /// Server-side token signing secret
    #[arg(long, env = "AUTH_TOKEN_SECRET", hide_env_values = true)]
    token_secret: String,

    /// Email of the registered user to make an admin
    #[arg(long)]
    email: String,
}

pub(crate) async fn run(args: PromoteUserArgs) -> Result<(), String> {
    let signer = TokenSigner::new(args.token_secret.as_bytes())
        .map_err(|error| format!("invalid token secret: {error}"))?;

    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let db = Db::new(pool);
    let service = PgUsersService::new(
        db.clone(),
        TokenIssuer::new(signer, DEFAULT_TOKEN_TTL_HOURS),
    );

    let result = service.promote_to_admin(&args.email).await;

    db.close().await;

    match result {
        Ok(user) => {
            println!("promoted {} ({}) to admin", user.email, user.uuid);
            Ok(())
        }
        Err(UsersServiceError::AlreadyAdmin) => {
            println!("{} is already an admin", args.email);
            Ok(())
        }
        Err(UsersServiceError::NotFound) => Err(format!("no user registered as {}", args.email)),
        Err(error) => Err(format!("failed to promote user: {error}")),
    }
}
