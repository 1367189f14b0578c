use std::fmt::Debug;

use crate::error::Result;
use crate::layout::validate_gemm;
use crate::order::{Order, Transpose};
use crate::BlasInt;

/// Trait for native dgemm providers (dynamically loaded BLAS, linked BLAS, etc.).
///
/// Implementors only supply `dgemm_raw`, a direct forward to the native
/// routine. Callers go through the provided `dgemm`, which validates the
/// arguments against the buffers before anything crosses the boundary.
pub trait MatrixMultiplier: Send + Sync + Debug {
    /// Returns the name of this provider (e.g. the loaded library path).
    fn name(&self) -> &str;

    /// Forward `C := alpha*op(A)*op(B) + beta*C` to the native routine.
    ///
    /// # Safety
    ///
    /// `a`, `b` and `c` must be valid for every element the routine touches
    /// given `order`, the transpose flags, the dimensions and the leading
    /// dimensions. `c` must not overlap `a` or `b`, and no other thread may
    /// access `c` during the call.
    #[allow(clippy::too_many_arguments)]
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
    );

    /// Double-precision general matrix multiply: `C := alpha*op(A)*op(B) + beta*C`.
    ///
    /// - `op(A)` is `m x k`, `op(B)` is `k x n`, `C` is `m x n`
    /// - `a` and `b` are only read; `c` is updated in place
    /// - buffers are passed by pointer, never copied
    ///
    /// Returns an error without calling into native code if a dimension is
    /// negative, a leading dimension is below its minimum, or a buffer is
    /// too short for the requested shape.
    #[allow(clippy::too_many_arguments)]
    fn dgemm(
        &self,
        order: Order,
        trans_a: Transpose,
        trans_b: Transpose,
        m: BlasInt,
        n: BlasInt,
        k: BlasInt,
        alpha: f64,
        a: &[f64],
        lda: BlasInt,
        b: &[f64],
        ldb: BlasInt,
        beta: f64,
        c: &mut [f64],
        ldc: BlasInt,
    ) -> Result<()> {
        if let Err(e) = validate_gemm(
            order,
            trans_a,
            trans_b,
            m,
            n,
            k,
            a.len(),
            lda,
            b.len(),
            ldb,
            c.len(),
            ldc,
        ) {
            tracing::debug!(provider = self.name(), error = %e, "dgemm rejected");
            return Err(e);
        }

        tracing::trace!(
            provider = self.name(),
            %order,
            %trans_a,
            %trans_b,
            m,
            n,
            k,
            "dgemm"
        );

        // SAFETY: validate_gemm checked every buffer against the extent the
        // routine reads or writes, and `c` is an exclusive borrow.
        unsafe {
            self.dgemm_raw(
                order,
                trans_a,
                trans_b,
                m,
                n,
                k,
                alpha,
                a.as_ptr(),
                lda,
                b.as_ptr(),
                ldb,
                beta,
                c.as_mut_ptr(),
                ldc,
            );
        }
        Ok(())
    }
}

impl<T: MatrixMultiplier + ?Sized> MatrixMultiplier for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    #[allow(clippy::too_many_arguments)]
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
        (**self).dgemm_raw(
            order, trans_a, trans_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc,
        )
    }
}
