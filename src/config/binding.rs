use bytesize::ByteSize;
use serde::Deserialize;

/// Process-wide defaults for request-body binding.
#[derive(Debug, Default, Deserialize)]
pub struct BindingConfig {
    pub use_opaque_numbers: Option<bool>,
    pub disallow_unknown_fields: Option<bool>,
    pub max_body_size_bytes: Option<usize>,
}

impl BindingConfig {
    pub fn use_opaque_numbers(&self) -> bool {
        self.use_opaque_numbers.unwrap_or(false)
    }

    pub fn disallow_unknown_fields(&self) -> bool {
        self.disallow_unknown_fields.unwrap_or(false)
    }

    pub fn max_body_size_bytes(&self) -> usize {
        self.max_body_size_bytes
            .unwrap_or(ByteSize::mib(10).as_u64() as usize) // 10 MB
    }
}
