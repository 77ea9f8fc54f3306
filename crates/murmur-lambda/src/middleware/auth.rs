use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use murmur_auth::identity::Identity;
use murmur_auth::jwt;

use crate::state::AppState;

/// Identity gate for the store and chat routes.
///
/// Extracts the `Authorization: Bearer <token>` header, validates the JWT
/// against the identity provider's issuer and signing key, and inserts the
/// resolved [`Identity`] into request extensions. Any failure is 401,
/// returned before the request body is read. Resolved once per request,
/// never cached.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    let claims = jwt::validate_token(token, &state.decoding_key, &state.issuer).map_err(|e| {
        tracing::debug!(error = %e, "rejected bearer token");
        StatusCode::UNAUTHORIZED
    })?;

    req.extensions_mut().insert(Identity::from(claims));

    Ok(next.run(req).await)
}
