//! Request extractors
//!
//! A thin wrapper over `axum::Json` whose rejection is our `ApiError`, so an
//! unparseable body produces the same 400 shape as every other bad request
//! instead of axum's default 422.

use crate::error::ApiError;
use axum::extract::FromRequest;

/// JSON body extractor with `ApiError` rejections
#[derive(Debug, Clone, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct Json<T>(pub T);
