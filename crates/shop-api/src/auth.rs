//! # Current User
//!
//! Session authentication lives in front of this service. It forwards the
//! authenticated user's id in the `x-user-id` header; `CurrentUser` resolves
//! that id against the user store.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::FromRequestParts, http::request::Parts};
use shop_core::{ShopError, User};

pub const USER_ID_HEADER: &str = "x-user-id";

/// Extractor for the authenticated user, including their cart.
///
/// The user is read once per request; cart writes made from this snapshot
/// replace whatever the store holds.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ShopError::Unauthenticated(format!("missing {} header", USER_ID_HEADER))
            })?;

        let user = state
            .users
            .find_user(&user_id)
            .await?
            .ok_or_else(|| ShopError::Unauthenticated(format!("unknown user: {}", user_id)))?;

        Ok(Self(user))
    }
}
