use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlasError {
    #[error("dimension {name} must be non-negative, got {value}")]
    NegativeDimension { name: &'static str, value: i32 },
    #[error("leading dimension {name}={value} is below the minimum {min}")]
    LeadingDimensionTooSmall {
        name: &'static str,
        value: i32,
        min: i32,
    },
    #[error("buffer {name} holds {len} elements but {required} are required")]
    BufferTooSmall {
        name: &'static str,
        len: usize,
        required: usize,
    },
    #[error("size of buffer {name} overflows usize")]
    SizeOverflow { name: &'static str },
    #[error("invalid CBLAS order value: {0}")]
    InvalidOrder(i32),
    #[error("invalid CBLAS transpose value: {0}")]
    InvalidTranspose(i32),
}

pub type Result<T> = std::result::Result<T, BlasError>;
