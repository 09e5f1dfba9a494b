//! Request extractors whose rejections come back as `{"error": ...}` with
//! status 400 instead of axum's plain-text bodies.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::Error;

/// JSON body. Malformed JSON, a missing field or a wrong content type is a
/// `BadRequest`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct AppJson<T>(pub T);

/// Path parameters, e.g. a `Uuid` id that fails to parse.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct AppPath<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct AppQuery<T>(pub T);
