//! Authentication and role checks for HTTP routes.

pub(crate) mod middleware;
