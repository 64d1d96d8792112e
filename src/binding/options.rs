use std::sync::{
    LazyLock,
    atomic::{AtomicBool, Ordering},
};

use crate::config::{self, BindingConfig};

static PROCESS_DEFAULTS: LazyLock<ProcessDefaults> =
    LazyLock::new(|| ProcessDefaults::from_config(config::get().binding()));

struct ProcessDefaults {
    use_opaque_numbers: AtomicBool,
    disallow_unknown_fields: AtomicBool,
}

impl ProcessDefaults {
    fn from_config(config: &BindingConfig) -> Self {
        Self {
            use_opaque_numbers: AtomicBool::new(config.use_opaque_numbers()),
            disallow_unknown_fields: AtomicBool::new(config.disallow_unknown_fields()),
        }
    }
}

/// How strictly the JSON decoder treats its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Keep numeric literals in untyped positions (`serde_json::Value`)
    /// exactly as written instead of coercing them to `f64`.
    ///
    /// Needs the `opaque-numbers` feature.
    pub use_opaque_numbers: bool,
    /// Reject object keys the target type does not declare.
    pub disallow_unknown_fields: bool,
}

impl DecoderOptions {
    pub const fn new() -> Self {
        Self {
            use_opaque_numbers: false,
            disallow_unknown_fields: false,
        }
    }

    pub const fn opaque_numbers(mut self, enabled: bool) -> Self {
        self.use_opaque_numbers = enabled;
        self
    }

    pub const fn deny_unknown_fields(mut self, enabled: bool) -> Self {
        self.disallow_unknown_fields = enabled;
        self
    }

    /// Options currently used by binders that do not pin their own.
    ///
    /// Seeded from the `binding` configuration section on first use.
    pub fn process_defaults() -> Self {
        let defaults = &*PROCESS_DEFAULTS;
        Self {
            use_opaque_numbers: defaults.use_opaque_numbers.load(Ordering::Relaxed),
            disallow_unknown_fields: defaults.disallow_unknown_fields.load(Ordering::Relaxed),
        }
    }

    /// Replaces the process defaults. Binders following them pick the change
    /// up on their next decode.
    pub fn set_process_defaults(self) {
        let defaults = &*PROCESS_DEFAULTS;
        defaults
            .use_opaque_numbers
            .store(self.use_opaque_numbers, Ordering::Relaxed);
        defaults
            .disallow_unknown_fields
            .store(self.disallow_unknown_fields, Ordering::Relaxed);

        tracing::debug!(
            use_opaque_numbers = self.use_opaque_numbers,
            disallow_unknown_fields = self.disallow_unknown_fields,
            "updated decoder defaults"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_each_flag_independently() {
        let options = DecoderOptions::new().deny_unknown_fields(true);
        assert!(options.disallow_unknown_fields);
        assert!(!options.use_opaque_numbers);

        let options = options.opaque_numbers(true).deny_unknown_fields(false);
        assert!(options.use_opaque_numbers);
        assert!(!options.disallow_unknown_fields);
    }

    #[test]
    fn defaults_seed_from_config() {
        let config = BindingConfig {
            use_opaque_numbers: Some(true),
            ..Default::default()
        };
        let defaults = ProcessDefaults::from_config(&config);

        assert!(defaults.use_opaque_numbers.load(Ordering::Relaxed));
        assert!(!defaults.disallow_unknown_fields.load(Ordering::Relaxed));
    }
}
