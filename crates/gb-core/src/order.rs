use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BlasError;

/// Storage order of the matrix buffers.
///
/// Discriminants match `CBLAS_ORDER` / `CBLAS_LAYOUT` in `cblas.h`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Order {
    RowMajor = 101,
    ColMajor = 102,
}

impl Order {
    /// The integer passed across the native boundary.
    pub fn as_raw(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for Order {
    type Error = BlasError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            101 => Ok(Order::RowMajor),
            102 => Ok(Order::ColMajor),
            other => Err(BlasError::InvalidOrder(other)),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Order::RowMajor => write!(f, "row-major"),
            Order::ColMajor => write!(f, "col-major"),
        }
    }
}

/// Operand orientation, `CBLAS_TRANSPOSE` in `cblas.h`.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transpose {
    NoTrans = 111,
    Trans = 112,
    /// Same as `Trans` for real operands.
    ConjTrans = 113,
}

impl Transpose {
    /// The integer passed across the native boundary.
    pub fn as_raw(self) -> i32 {
        self as i32
    }

    /// Returns true if the operand is read transposed.
    pub fn is_transposed(self) -> bool {
        !matches!(self, Transpose::NoTrans)
    }
}

impl TryFrom<i32> for Transpose {
    type Error = BlasError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            111 => Ok(Transpose::NoTrans),
            112 => Ok(Transpose::Trans),
            113 => Ok(Transpose::ConjTrans),
            other => Err(BlasError::InvalidTranspose(other)),
        }
    }
}

impl fmt::Display for Transpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transpose::NoTrans => write!(f, "N"),
            Transpose::Trans => write!(f, "T"),
            Transpose::ConjTrans => write!(f, "C"),
        }
    }
}
