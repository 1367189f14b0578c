//! `gb-core` - Checked dgemm entry point for gemm-bridge.
//!
//! This crate provides:
//! - The CBLAS `Order` and `Transpose` enumerations
//! - A `MatrixMultiplier` trait implemented by native BLAS providers
//! - Leading-dimension and buffer-length validation run before any call
//!   crosses into native code

pub mod error;
pub mod layout;
pub mod multiplier;
pub mod order;

// Re-export primary types at the crate root for convenience.
pub use error::{BlasError, Result};
pub use layout::{validate_gemm, OperandLayout};
pub use multiplier::MatrixMultiplier;
pub use order::{Order, Transpose};

/// Native integer type used for dimensions and leading dimensions (LP64).
pub type BlasInt = i32;
