//! Custom Axum extractors.
//!
//! - [`CorrelationId`]: request correlation ID from the middleware or header
//! - [`BearerToken`]: token from `Authorization: Bearer <token>`
//! - [`AuthenticatedUser`]: the user a bearer token belongs to
//!
//! # Examples
//!
//! ```ignore
//! async fn handler(user: AuthenticatedUser, correlation_id: CorrelationId) -> String {
//!     tracing::info!(correlation_id = %correlation_id.0, user_id = %user.user_id, "Processing request");
//!     format!("Hello {}", user.user_id)
//! }
//! ```

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use crate::state::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use hotel_booking_core::{SessionRepository, UserId};
use uuid::Uuid;

/// Correlation ID for request tracing.
///
/// Reuses the ID stored by the correlation middleware, else reads the
/// `X-Correlation-ID` header, else generates a new UUID v4.
#[derive(Debug, Clone, Copy)]
pub struct CorrelationId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let correlation_id = parts
            .extensions
            .get::<Uuid>()
            .copied()
            .or_else(|| {
                parts
                    .headers
                    .get(CORRELATION_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| Uuid::parse_str(s).ok())
            })
            .unwrap_or_else(Uuid::new_v4);

        Ok(Self(correlation_id))
    }
}

/// Bearer token extracted from `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header"))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization format. Expected 'Bearer <token>'")
        })?;

        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::unauthorized("Empty bearer token"));
        }

        Ok(Self(token.to_string()))
    }
}

/// Authenticated user.
///
/// Resolves the bearer token through the session store. Use this as a
/// handler parameter to require authentication.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    /// The user the session belongs to
    pub user_id: UserId,
}

#[async_trait]
impl<B, L, S> FromRequestParts<AppState<B, L, S>> for AuthenticatedUser
where
    B: Send + Sync,
    L: Send + Sync,
    S: SessionRepository + 'static,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<B, L, S>,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;

        let user_id = state
            .sessions
            .find_user_by_token(&token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Invalid or expired session"))?;

        tracing::Span::current().record("user_id", tracing::field::display(user_id));
        Ok(Self { user_id })
    }
}
