use axum::http::Request;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use validator::Validate;

use crate::{
    binding::{Binding, BindingBody, DecoderOptions, RequestBody, body, validate},
    common::{BindError, BindResult, DecodeError},
    config,
};

/// Binds JSON payloads.
///
/// A binder either pins its [`DecoderOptions`] or follows the process
/// defaults, read again on every decode. Request bodies are read up to the
/// body limit (`binding.max_body_size_bytes` unless overridden).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonBinding {
    options: Option<DecoderOptions>,
    body_limit: Option<usize>,
}

impl JsonBinding {
    /// A binder following the process defaults.
    pub const fn new() -> Self {
        Self {
            options: None,
            body_limit: None,
        }
    }

    pub const fn with_options(options: DecoderOptions) -> Self {
        Self {
            options: Some(options),
            body_limit: None,
        }
    }

    pub const fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = Some(limit);
        self
    }

    /// Options the next decode will use.
    pub fn options(&self) -> DecoderOptions {
        self.options.unwrap_or_else(DecoderOptions::process_defaults)
    }

    fn limit(&self) -> usize {
        self.body_limit
            .unwrap_or_else(|| config::get().binding().max_body_size_bytes())
    }
}

impl Binding for JsonBinding {
    fn name(&self) -> &'static str {
        "json"
    }

    async fn bind<T, B>(&self, req: Request<B>) -> BindResult<T>
    where
        T: DeserializeOwned + Validate,
        B: RequestBody,
    {
        let value = self.bind_only(req).await?;
        validate(&value)?;
        Ok(value)
    }

    async fn bind_only<T, B>(&self, req: Request<B>) -> BindResult<T>
    where
        T: DeserializeOwned,
        B: RequestBody,
    {
        let Some(stream) = req.into_body().into_optional_body() else {
            return Err(BindError::InvalidRequest);
        };

        let bytes = body::read_to_bytes(stream, self.limit()).await?;

        Ok(decode_json(&bytes, self.options())?)
    }
}

impl BindingBody for JsonBinding {
    fn bind_body<T>(&self, body: &[u8]) -> BindResult<T>
    where
        T: DeserializeOwned + Validate,
    {
        let value = self.bind_body_only(body)?;
        validate(&value)?;
        Ok(value)
    }

    fn bind_body_only<T>(&self, body: &[u8]) -> BindResult<T>
    where
        T: DeserializeOwned,
    {
        Ok(decode_json(body, self.options())?)
    }
}

/// Decodes the first JSON value in `input`; trailing bytes are left unread.
pub(crate) fn decode_json<T>(input: &[u8], options: DecoderOptions) -> Result<T, DecodeError>
where
    T: DeserializeOwned,
{
    tracing::debug!(
        len = input.len(),
        use_opaque_numbers = options.use_opaque_numbers,
        disallow_unknown_fields = options.disallow_unknown_fields,
        "decoding json body"
    );

    let mut de = serde_json::Deserializer::from_slice(input);

    // Arbitrary precision hands untyped numbers over as literal text; bring
    // them back to u64/i64/f64 while the input streams through.
    #[cfg(feature = "opaque-numbers")]
    {
        if !options.use_opaque_numbers {
            return deserialize_target(
                super::number::Coerce::new(&mut de),
                options.disallow_unknown_fields,
            );
        }
    }

    deserialize_target(&mut de, options.disallow_unknown_fields)
}

fn deserialize_target<'de, D, T>(de: D, disallow_unknown_fields: bool) -> Result<T, DecodeError>
where
    D: Deserializer<'de, Error = serde_json::Error>,
    T: Deserialize<'de>,
{
    if !disallow_unknown_fields {
        return Ok(T::deserialize(de)?);
    }

    let mut unknown = None;
    let value = serde_ignored::deserialize(de, |path| {
        unknown.get_or_insert_with(|| path.to_string());
    })?;

    match unknown {
        Some(field) => {
            tracing::debug!(%field, "rejecting unknown field");
            Err(DecodeError::UnknownField(field))
        }
        None => Ok(value),
    }
}
