use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::TypedHeader;
use headers::{Authorization, authorization::Bearer};

use crate::auth::token_fingerprint;
use crate::error::ApiError;
use crate::models::AppState;

/// Proof that the request carried the shared service token.
///
/// Identity and session management live in the external shell; this server
/// only checks that the caller presented the token the shell was issued.
#[derive(Debug, Clone)]
pub struct AuthContext;

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = ApiError;

    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            // Extract Authorization: Bearer <token>
            let TypedHeader(authz): TypedHeader<Authorization<Bearer>> =
                TypedHeader::from_request_parts(parts, state)
                    .await
                    .map_err(|_| ApiError::invalid_token())?;

            if token_fingerprint(authz.token()) != state.service_token_fingerprint {
                return Err(ApiError::invalid_token());
            }

            Ok(AuthContext)
        }
    }
}
