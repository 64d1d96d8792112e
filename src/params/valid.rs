use axum::extract::FromRequest;

use crate::common::error::BindError;

/// Runs `validator` rules on the extracted value; `Valid<Json<T>>` binds and
/// validates a JSON body.
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum_valid::Valid), rejection(BindError))]
pub struct Valid<T>(pub T);
