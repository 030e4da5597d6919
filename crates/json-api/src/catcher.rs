//! JSON error bodies.

use salvo::{catcher::Catcher, http::ResBody, oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

/// Body of every failed response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorResponse {
    pub message: String,
}

/// Render client and server errors as `{ "message": ... }`.
///
/// Uses the brief of the [`StatusError`] a handler returned, falling back to
/// the canonical reason phrase.
#[salvo::handler]
pub(crate) async fn json_error(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res.status_code else {
        return;
    };

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    let message = match std::mem::replace(&mut res.body, ResBody::None) {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief,
        _ => status.canonical_reason().unwrap_or("Error").to_string(),
    };

    res.status_code(status);
    res.render(Json(ErrorResponse { message }));

    ctrl.skip_rest();
}

pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(json_error)
}
