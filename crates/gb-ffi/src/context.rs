use gb_core::MatrixMultiplier;
use gb_native::{BlasConfig, DynamicBlas, NativeError};

/// Opaque context handle that owns the native dgemm provider.
#[derive(Debug)]
pub struct GbContext {
    pub multiplier: Box<dyn MatrixMultiplier>,
}

impl GbContext {
    /// Load a `DynamicBlas` described by `config`.
    pub fn load(config: &BlasConfig) -> Result<Self, NativeError> {
        let blas = DynamicBlas::load(config)?;
        Ok(Self::with_multiplier(Box::new(blas)))
    }

    pub fn with_multiplier(multiplier: Box<dyn MatrixMultiplier>) -> Self {
        Self { multiplier }
    }
}
