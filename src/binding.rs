//! Decoding request bodies into typed values.
//!
//! A binding turns a payload into a `T`. The `*_only` operations stop after
//! decoding; the others also run [`Validate`] on the decoded value and only
//! when decoding succeeded.

pub mod body;
pub mod json;
#[cfg(feature = "opaque-numbers")]
mod number;
pub mod options;

use std::future::Future;

use axum::http::Request;
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::common::BindResult;

pub use body::RequestBody;
pub use json::JsonBinding;
pub use options::DecoderOptions;

/// JSON binder following the process defaults.
pub const JSON: JsonBinding = JsonBinding::new();

/// Binds the body of an HTTP request.
pub trait Binding {
    fn name(&self) -> &'static str;

    /// Decodes the request body and validates the result.
    fn bind<T, B>(&self, req: Request<B>) -> impl Future<Output = BindResult<T>> + Send
    where
        T: DeserializeOwned + Validate,
        B: RequestBody;

    /// Decodes the request body without validating it.
    fn bind_only<T, B>(&self, req: Request<B>) -> impl Future<Output = BindResult<T>> + Send
    where
        T: DeserializeOwned,
        B: RequestBody;
}

/// Binds a body that is already in memory.
pub trait BindingBody: Binding {
    fn bind_body<T>(&self, body: &[u8]) -> BindResult<T>
    where
        T: DeserializeOwned + Validate;

    fn bind_body_only<T>(&self, body: &[u8]) -> BindResult<T>
    where
        T: DeserializeOwned;
}

pub(crate) fn validate<T: Validate>(value: &T) -> BindResult<()> {
    value.validate().map_err(|errors| {
        tracing::debug!(%errors, "bound value failed validation");
        errors.into()
    })
}
