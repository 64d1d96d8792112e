pub mod error;
pub mod response;

pub use error::{BindError, BindResult, DecodeError};
pub use response::ApiResponse;
