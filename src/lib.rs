//! JSON request-body binding for axum services.
//!
//! ```no_run
//! use jsonbind::binding::{BindingBody, DecoderOptions, JsonBinding};
//!
//! #[derive(serde::Deserialize, validator::Validate)]
//! struct Signup {
//!     #[validate(email)]
//!     email: String,
//! }
//!
//! let strict = JsonBinding::with_options(DecoderOptions::new().deny_unknown_fields(true));
//! let signup: Signup = strict.bind_body(br#"{"email":"a@example.com"}"#)?;
//! # Ok::<(), jsonbind::common::BindError>(())
//! ```

pub mod binding;
pub mod common;
pub mod config;
pub mod logger;
pub mod params;

pub use binding::{Binding, BindingBody, DecoderOptions, JsonBinding};
pub use common::{BindError, BindResult, DecodeError};
