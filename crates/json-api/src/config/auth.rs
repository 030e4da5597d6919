//! Auth Config

use clap::Args;

use storefront_app::auth::DEFAULT_TOKEN_TTL_HOURS;

/// Bearer token settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Server-side key used to sign token verifiers (at least 32 bytes)
    #[arg(long, env = "AUTH_TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,

    /// Lifetime of newly issued tokens, in hours
    #[arg(long, env = "AUTH_TOKEN_TTL_HOURS", default_value_t = DEFAULT_TOKEN_TTL_HOURS)]
    pub token_ttl_hours: u16,
}
