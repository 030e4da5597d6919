//! Authentication and access control

pub mod access;
mod errors;
mod issuer;
mod models;
mod repository;
mod service;
mod signer;
mod token;

pub use access::{AccessDenied, authorize_admin, authorize_owner_or_admin};
pub use errors::*;
pub use issuer::TokenIssuer;
pub(crate) use models::{ActiveApiToken, NewApiToken};
pub use models::{ApiTokenMetadata, Identity, IssuedApiToken};
pub use service::*;
pub use signer::*;
pub use token::*;
