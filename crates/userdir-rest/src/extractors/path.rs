//! User id path extractor.

use crate::responses::detail;
use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::Response,
};
use userdir_core::UserId;

/// Extracts the `:id` path segment; anything but an integer yields 422.
#[derive(Debug, Clone, Copy)]
pub struct UserIdPath(pub UserId);

#[async_trait]
impl<S> FromRequestParts<S> for UserIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| detail(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()))?;

        Ok(Self(UserId::new(id)))
    }
}
