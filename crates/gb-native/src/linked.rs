use std::os::raw::{c_double, c_int};

use gb_core::{BlasInt, MatrixMultiplier, Order, Transpose};

// Resolved by the system linker; build.rs picks the library (GB_BLAS_LINK).
extern "C" {
    fn cblas_dgemm(
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
}

/// `cblas_dgemm` bound at link time.
///
/// `name()` reports the library build.rs linked against, e.g. `cblas` or
/// `Accelerate`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkedBlas;

impl LinkedBlas {
    pub fn new() -> Self {
        LinkedBlas
    }
}

impl MatrixMultiplier for LinkedBlas {
    fn name(&self) -> &str {
        env!("GB_BLAS_LINK_NAME")
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
        cblas_dgemm(
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_is_link_name() {
        // cargo forwards its environment to rustc, so this sees the same
        // GB_BLAS_LINK that build.rs did
        let lib = crate::link::link_lib(option_env!("GB_BLAS_LINK"), std::env::consts::OS);
        assert_eq!(LinkedBlas::new().name(), crate::link::link_name(&lib));
    }

    #[test]
    fn test_linked_product() {
        let mut c = vec![0.0; 4];
        LinkedBlas::new()
            .dgemm(
                Order::RowMajor,
                Transpose::NoTrans,
                Transpose::NoTrans,
                2,
                2,
                2,
                1.0,
                &[1.0, 2.0, 3.0, 4.0],
                2,
                &[5.0, 6.0, 7.0, 8.0],
                2,
                0.0,
                &mut c,
                2,
            )
            .unwrap();
        assert_eq!(c, vec![19.0, 22.0, 43.0, 50.0]);
    }
}
