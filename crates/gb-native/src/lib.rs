//! `gb-native` - Native BLAS providers for gemm-bridge.
//!
//! - `DynamicBlas` resolves `cblas_dgemm` from a shared library chosen at
//!   runtime through `BlasConfig` (environment, JSON file, or code)
//! - `LinkedBlas` (feature `link`) binds the symbol at link time

pub mod config;
pub mod dynamic;
pub mod error;
#[cfg(feature = "link")]
pub mod linked;

#[cfg(test)]
#[path = "../link.rs"]
mod link;

pub use config::BlasConfig;
pub use dynamic::DynamicBlas;
pub use error::{NativeError, Result};
#[cfg(feature = "link")]
pub use linked::LinkedBlas;

pub use gb_core::{BlasError, MatrixMultiplier, Order, Transpose};
