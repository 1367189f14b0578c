use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{NativeError, Result};

/// Environment variable naming the BLAS shared library (file name or path).
pub const ENV_LIBRARY: &str = "GB_BLAS_LIBRARY";
/// Environment variable overriding the exported dgemm symbol.
pub const ENV_SYMBOL: &str = "GB_BLAS_SYMBOL";
/// CBLAS entry point exported by MKL, OpenBLAS, Accelerate and netlib CBLAS.
pub const DEFAULT_SYMBOL: &str = "cblas_dgemm";

/// Library names tried in order when no library is configured.
///
/// The MKL runtime comes first, then OpenBLAS, then whatever generic CBLAS
/// the platform ships.
#[cfg(target_os = "windows")]
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "mkl_rt.dll",
    "mkl_rt.2.dll",
    "libopenblas.dll",
    "openblas.dll",
];

#[cfg(target_os = "macos")]
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "libmkl_rt.dylib",
    "libmkl_rt.2.dylib",
    "libopenblas.dylib",
    "/opt/homebrew/opt/openblas/lib/libopenblas.dylib",
    "/usr/local/opt/openblas/lib/libopenblas.dylib",
    "/System/Library/Frameworks/Accelerate.framework/Accelerate",
];

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const DEFAULT_CANDIDATES: &[&str] = &[
    "libmkl_rt.so",
    "libmkl_rt.so.2",
    "libopenblas.so.0",
    "libopenblas.so",
    "libcblas.so.3",
    "libcblas.so",
    "libblas.so.3",
];

/// Where to find the native dgemm routine.
///
/// All fields are optional in serialized form:
///
/// ```json
/// { "library": "/opt/intel/oneapi/mkl/latest/lib/libmkl_rt.so" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlasConfig {
    /// Explicit library file name or path. `None` searches `DEFAULT_CANDIDATES`.
    pub library: Option<PathBuf>,
    /// Exported symbol to bind.
    pub symbol: String,
}

impl Default for BlasConfig {
    fn default() -> Self {
        Self {
            library: None,
            symbol: DEFAULT_SYMBOL.to_string(),
        }
    }
}

impl BlasConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_library(mut self, library: impl Into<PathBuf>) -> Self {
        self.library = Some(library.into());
        self
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Build a config from `GB_BLAS_LIBRARY` and `GB_BLAS_SYMBOL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset or blank values
    /// keep the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();
        if let Some(library) = non_blank(ENV_LIBRARY) {
            config.library = Some(PathBuf::from(library.trim()));
        }
        if let Some(symbol) = non_blank(ENV_SYMBOL) {
            config.symbol = symbol.trim().to_string();
        }
        config
    }

    /// Load a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| NativeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Libraries to try, in order.
    pub fn candidates(&self) -> Vec<PathBuf> {
        match &self.library {
            Some(library) => vec![library.clone()],
            None => DEFAULT_CANDIDATES.iter().map(PathBuf::from).collect(),
        }
    }
}
