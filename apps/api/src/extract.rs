//! Request extractors whose rejections share the `{"error":{...}}` body of [`AppError`].

use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json` with rejections mapped through `AppError`: an oversized body becomes
/// `PAYLOAD_TOO_LARGE`, anything else malformed becomes `VALIDATION_ERROR`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
