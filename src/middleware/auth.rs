use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::Error;
use crate::utils::token::{bearer_token, AuthError};
use crate::AppState;

/// Rejects the request with 401 unless it carries a valid bearer token;
/// on success the caller's [`Identity`](crate::utils::token::Identity) is
/// placed in the request extensions. The user row is not re-checked here.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let result = match req.headers().get(AUTHORIZATION).map(|value| value.to_str()) {
        Some(Err(_)) => Err(AuthError::InvalidToken),
        Some(Ok(header)) => bearer_token(Some(header)),
        None => bearer_token(None),
    }
    .and_then(|token| state.tokens.validate(token));

    let identity = match result {
        Ok(identity) => identity,
        Err(err) => {
            tracing::debug!(error = %err, "bearer authentication failed");
            return Error::Auth(err).into_response();
        }
    };

    req.extensions_mut().insert(identity);
    next.run(req).await
}
