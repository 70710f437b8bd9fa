//! Bearer tokens for outbound calls.
//!
//! The OAuth layer in front of this service installs the signed-in user's
//! access token as `Authorization: Bearer`. Every route requires it.
//! Collection and definition management then runs with the configured
//! service credential instead, falling back to the user's token when none
//! is configured.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::infra::{app_state::AppState, errors::AppError};

fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty())
        .then(|| token.to_string())
}

/// The caller's own access token.
#[derive(Debug, Clone)]
pub struct UserToken(pub String);

impl<S> FromRequestParts<S> for UserToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        bearer_token(parts)
            .map(UserToken)
            .ok_or_else(|| AppError::unauthorized("missing bearer token"))
    }
}

/// The application credential used for collection and definition routes.
///
/// Anonymous callers are rejected even when a service credential exists.
#[derive(Debug, Clone)]
pub struct ServiceToken(pub String);

impl FromRequestParts<AppState> for ServiceToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let caller = bearer_token(parts)
            .ok_or_else(|| AppError::unauthorized("missing bearer token"))?;

        Ok(ServiceToken(
            state.service_token().map(str::to_string).unwrap_or(caller),
        ))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn reads_bearer_token() {
        assert_eq!(
            bearer_token(&parts(Some("Bearer abc.def"))).as_deref(),
            Some("abc.def")
        );
        assert_eq!(
            bearer_token(&parts(Some("bearer xyz"))).as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn rejects_other_schemes_and_blank_tokens() {
        assert!(bearer_token(&parts(Some("Basic dXNlcg=="))).is_none());
        assert!(bearer_token(&parts(Some("Bearer   "))).is_none());
        assert!(bearer_token(&parts(None)).is_none());
    }
}
