use gb_core::BlasError;
use gb_native::NativeError;

/// Status codes returned by all FFI functions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GbStatus {
    Ok = 0,
    ErrorInvalidArgument = 1,
    ErrorLibraryLoad = 2,
    ErrorInvalidDimension = 3,
    ErrorBufferTooSmall = 4,
    ErrorInternal = 5,
}

impl From<&BlasError> for GbStatus {
    fn from(e: &BlasError) -> Self {
        match e {
            BlasError::InvalidOrder(_) | BlasError::InvalidTranspose(_) => {
                GbStatus::ErrorInvalidArgument
            }
            BlasError::BufferTooSmall { .. } | BlasError::SizeOverflow { .. } => {
                GbStatus::ErrorBufferTooSmall
            }
            BlasError::NegativeDimension { .. } | BlasError::LeadingDimensionTooSmall { .. } => {
                GbStatus::ErrorInvalidDimension
            }
        }
    }
}

impl From<&NativeError> for GbStatus {
    fn from(e: &NativeError) -> Self {
        match e {
            NativeError::ConfigIo { .. } | NativeError::ConfigParse(_) => {
                GbStatus::ErrorInvalidArgument
            }
            NativeError::LibraryNotFound { .. }
            | NativeError::Load { .. }
            | NativeError::SymbolNotFound { .. } => GbStatus::ErrorLibraryLoad,
        }
    }
}
