//! Offset pagination query extractor.

use crate::responses::detail;
use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, StatusCode},
    response::Response,
};
use serde::Deserialize;
use userdir_core::PageRequest;

/// Raw `?skip=&limit=` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationQuery {
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(query: PaginationQuery) -> Self {
        Self::new(
            query.skip.unwrap_or(0),
            query.limit.unwrap_or(Self::DEFAULT_LIMIT),
        )
    }
}

/// Extracts a [`PageRequest`]; negative or non-integer values yield 422.
#[derive(Debug, Clone, Copy)]
pub struct Pagination(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<PaginationQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| detail(StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text()))?;

        Ok(Self(query.into()))
    }
}
