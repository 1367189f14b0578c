use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NativeError {
    #[error("no BLAS library could be loaded (tried: {})", .tried.join("; "))]
    LibraryNotFound { tried: Vec<String> },
    #[error("failed to load BLAS library {library}: {source}")]
    Load {
        library: String,
        #[source]
        source: libloading::Error,
    },
    #[error("symbol {symbol} not found in {library}: {source}")]
    SymbolNotFound {
        symbol: String,
        library: String,
        #[source]
        source: libloading::Error,
    },
    #[error("failed to read config {}: {source}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, NativeError>;
