// Optional bearer gate for the chat endpoints
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::AppState;

/// Caller identity as far as the API knows it: the bearer token, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub token: Option<String>,
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split_once(' '))
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|token| !token.is_empty())
}

impl AuthConfig {
    pub fn authorize(&self, token: Option<&str>) -> Result<(), ApiError> {
        if !self.require_bearer {
            return Ok(());
        }

        let token = token
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".to_string()))?;

        if !self.tokens.is_empty() && !self.tokens.iter().any(|t| t == token) {
            return Err(ApiError::Unauthorized("unknown bearer token".to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers);

        if let Err(e) = state.config.auth.authorize(token) {
            tracing::warn!(path = %parts.uri.path(), "Rejected request: {}", e);
            return Err(e);
        }

        Ok(Caller {
            token: token.map(str::to_string),
        })
    }
}
