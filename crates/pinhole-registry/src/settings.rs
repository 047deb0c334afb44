use jiff::SignedDuration;
use typed_builder::TypedBuilder;

pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 64;

/// Configures a [`RegistryService`](crate::RegistryService).
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RegistrySettings {
    /// Lifetime of a link created without a usable validity.
    #[builder(default = SignedDuration::from_mins(DEFAULT_VALIDITY_MINUTES))]
    pub default_validity: SignedDuration,
    /// How many generated codes to probe before giving up with
    /// `GenerationExhausted`.
    #[builder(default = DEFAULT_MAX_GENERATION_ATTEMPTS)]
    pub max_generation_attempts: u32,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::builder().build()
    }
}
