pub mod json;
pub mod valid;

pub use json::Json;
pub use valid::Valid;
