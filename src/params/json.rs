use axum::extract::{FromRequest, Request};
use axum_valid::HasValidate;
use serde::de::DeserializeOwned;

use crate::{
    binding::{self, Binding, JsonBinding},
    common::error::BindError,
};

/// JSON body extractor.
///
/// Decodes with the [`JsonBinding`] found in the request extensions (insert
/// one with `axum::Extension`), or [`binding::JSON`] when there is none.
/// Wrap it in [`Valid`](crate::params::Valid) to also validate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = BindError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let binding = req
            .extensions()
            .get::<JsonBinding>()
            .copied()
            .unwrap_or(binding::JSON);

        binding.bind_only(req).await.map(Json)
    }
}

impl<T> HasValidate for Json<T> {
    type Validate = T;

    fn get_validate(&self) -> &Self::Validate {
        &self.0
    }
}
