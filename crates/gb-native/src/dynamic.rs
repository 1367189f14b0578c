use std::fmt;
use std::os::raw::{c_double, c_int};
use std::path::Path;

use libloading::Library;

use gb_core::{BlasInt, MatrixMultiplier, Order, Transpose};

use crate::config::BlasConfig;
use crate::error::{NativeError, Result};

/// `cblas_dgemm` as declared in `cblas.h` (LP64 integers, enums as `int`).
pub(crate) type DgemmFn = unsafe extern "C" fn(
    order: c_int,
    trans_a: c_int,
    trans_b: c_int,
    m: c_int,
    n: c_int,
    k: c_int,
    alpha: c_double,
    a: *const c_double,
    lda: c_int,
    b: *const c_double,
    ldb: c_int,
    beta: c_double,
    c: *mut c_double,
    ldc: c_int,
);

/// A BLAS shared library opened at runtime.
///
/// Owns the library handle, so the resolved function pointer stays valid for
/// the lifetime of this value.
pub struct DynamicBlas {
    name: String,
    dgemm: DgemmFn,
    _library: Library,
}

impl DynamicBlas {
    /// Open the configured library, or the first default candidate that
    /// exports `config.symbol`.
    pub fn load(config: &BlasConfig) -> Result<Self> {
        if let Some(library) = &config.library {
            return Self::open(library, &config.symbol);
        }

        let mut tried = Vec::new();
        for candidate in config.candidates() {
            match Self::open(&candidate, &config.symbol) {
                Ok(blas) => return Ok(blas),
                Err(e) => {
                    tracing::debug!(candidate = %candidate.display(), error = %e, "BLAS candidate rejected");
                    tried.push(e.to_string());
                }
            }
        }
        Err(NativeError::LibraryNotFound { tried })
    }

    /// Load using `BlasConfig::from_env`.
    pub fn from_env() -> Result<Self> {
        Self::load(&BlasConfig::from_env())
    }

    /// Open one library and bind `symbol` from it.
    ///
    /// The library's initialisers run on load; it must be a conforming BLAS.
    pub fn open(library: &Path, symbol: &str) -> Result<Self> {
        let name = library.display().to_string();

        // SAFETY: loading runs the library's initialisers; callers select a
        // BLAS library, which has no initialisation preconditions.
        let lib = unsafe { Library::new(library) }.map_err(|source| NativeError::Load {
            library: name.clone(),
            source,
        })?;

        // SAFETY: the symbol is declared with the cblas.h signature.
        let dgemm = unsafe { lib.get::<DgemmFn>(symbol.as_bytes()) }
            .map(|sym| *sym)
            .map_err(|source| NativeError::SymbolNotFound {
                symbol: symbol.to_string(),
                library: name.clone(),
                source,
            })?;

        tracing::info!(library = %name, symbol, "loaded BLAS library");
        Ok(Self::from_parts(name, dgemm, lib))
    }

    /// Wrap an already resolved entry point. `dgemm` must stay valid while
    /// `library` is loaded.
    pub(crate) fn from_parts(name: String, dgemm: DgemmFn, library: Library) -> Self {
        DynamicBlas {
            name,
            dgemm,
            _library: library,
        }
    }

    /// Path or file name the library was opened from.
    pub fn library(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for DynamicBlas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicBlas")
            .field("library", &self.name)
            .finish_non_exhaustive()
    }
}

impl MatrixMultiplier for DynamicBlas {
    fn name(&self) -> &str {
        &self.name
    }

    unsafe fn dgemm_raw(
        &self,
        order: Order,
        trans_a: Transpose,
        trans_b: Transpose,
        m: BlasInt,
        n: BlasInt,
        k: BlasInt,
        alpha: f64,
        a: *const f64,
        lda: BlasInt,
        b: *const f64,
        ldb: BlasInt,
        beta: f64,
        c: *mut f64,
        ldc: BlasInt,
    ) {
        (self.dgemm)(
            order.as_raw(),
            trans_a.as_raw(),
            trans_b.as_raw(),
            m,
            n,
            k,
            alpha,
            a,
            lda,
            b,
            ldb,
            beta,
            c,
            ldc,
        )
    }
}
