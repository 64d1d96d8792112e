use axum::body::Body;
use bytes::Bytes;
use http_body_util::{BodyExt, LengthLimitError, Limited};

use crate::common::DecodeError;

/// A request body that may be missing.
///
/// `Request<()>` and `Request<Option<_>>` holding `None` have no body; the
/// byte containers and [`Body`] always do, even when empty.
pub trait RequestBody: Send {
    fn into_optional_body(self) -> Option<Body>;
}

impl RequestBody for Body {
    fn into_optional_body(self) -> Option<Body> {
        Some(self)
    }
}

impl RequestBody for () {
    fn into_optional_body(self) -> Option<Body> {
        None
    }
}

impl<B: RequestBody> RequestBody for Option<B> {
    fn into_optional_body(self) -> Option<Body> {
        self.and_then(RequestBody::into_optional_body)
    }
}

impl RequestBody for Bytes {
    fn into_optional_body(self) -> Option<Body> {
        Some(Body::from(self))
    }
}

impl RequestBody for Vec<u8> {
    fn into_optional_body(self) -> Option<Body> {
        Some(Body::from(self))
    }
}

impl RequestBody for String {
    fn into_optional_body(self) -> Option<Body> {
        Some(Body::from(self))
    }
}

/// Collects the whole body, failing once more than `limit` bytes arrive.
pub(crate) async fn read_to_bytes(body: Body, limit: usize) -> Result<Bytes, DecodeError> {
    match Limited::new(body, limit).collect().await {
        Ok(collected) => {
            let bytes = collected.to_bytes();
            tracing::trace!(len = bytes.len(), "read request body");
            Ok(bytes)
        }
        Err(err) if err.is::<LengthLimitError>() => Err(DecodeError::TooLarge { limit }),
        Err(err) => Err(DecodeError::Read(err)),
    }
}
