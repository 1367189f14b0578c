mod context;
mod error;
mod logging;
mod types;

pub use context::*;
pub use error::*;
pub use types::*;

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_double, c_int};
use std::panic::AssertUnwindSafe;
use std::path::PathBuf;

use gb_core::{Order, Transpose};
use gb_native::BlasConfig;

use crate::error::report;

/// Execute a closure that returns a `GbStatus`, catching any panics
/// and converting them into `GbStatus::ErrorInternal`.
fn catch_panic<F: FnOnce() -> GbStatus>(f: F) -> GbStatus {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(status) => status,
        Err(_) => {
            set_last_error("internal panic".to_string());
            GbStatus::ErrorInternal
        }
    }
}

/// View a caller buffer as a slice. A zero length yields an empty slice
/// whatever the pointer; a null pointer with a non-zero length is rejected.
unsafe fn input_slice<'a>(ptr: *const c_double, len: usize) -> Option<&'a [f64]> {
    if len == 0 {
        return Some(&[]);
    }
    if ptr.is_null() {
        return None;
    }
    Some(std::slice::from_raw_parts(ptr, len))
}

unsafe fn output_slice<'a>(ptr: *mut c_double, len: usize) -> Option<&'a mut [f64]> {
    if len == 0 {
        return Some(&mut []);
    }
    if ptr.is_null() {
        return None;
    }
    Some(std::slice::from_raw_parts_mut(ptr, len))
}

fn parse_flags(
    order: c_int,
    trans_a: c_int,
    trans_b: c_int,
) -> gb_core::Result<(Order, Transpose, Transpose)> {
    Ok((
        Order::try_from(order)?,
        Transpose::try_from(trans_a)?,
        Transpose::try_from(trans_b)?,
    ))
}

/// Install a stderr log subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; later calls leave the first subscriber in place.
#[no_mangle]
pub extern "C" fn gb_init_logging() -> GbStatus {
    if !logging::init() {
        tracing::debug!("log subscriber already installed");
    }
    GbStatus::Ok
}

/// Create a context bound to a native BLAS library.
///
/// `library_path` names the shared library to open. If it is null, the
/// library and symbol come from `GB_BLAS_LIBRARY` / `GB_BLAS_SYMBOL`, or the
/// platform default search list. On success, writes a heap-allocated
/// `GbContext` pointer into `*ctx_out`; the caller must later call
/// `gb_context_destroy`.
#[no_mangle]
pub unsafe extern "C" fn gb_context_create(
    library_path: *const c_char,
    ctx_out: *mut *mut GbContext,
) -> GbStatus {
    catch_panic(|| {
        if ctx_out.is_null() {
            set_last_error("ctx_out is null".to_string());
            return GbStatus::ErrorInvalidArgument;
        }

        let mut config = BlasConfig::from_env();
        if !library_path.is_null() {
            match unsafe { CStr::from_ptr(library_path) }.to_str() {
                Ok(s) => config.library = Some(PathBuf::from(s)),
                Err(e) => {
                    set_last_error(format!("invalid library path: {}", e));
                    return GbStatus::ErrorInvalidArgument;
                }
            }
        }

        match GbContext::load(&config) {
            Ok(ctx) => {
                unsafe { *ctx_out = Box::into_raw(Box::new(ctx)) };
                GbStatus::Ok
            }
            Err(e) => report(&e),
        }
    })
}

/// Destroy a context previously created by `gb_context_create`.
///
/// Passing a null pointer is a no-op and returns `GbStatus::Ok`.
#[no_mangle]
pub unsafe extern "C" fn gb_context_destroy(ctx: *mut GbContext) -> GbStatus {
    if ctx.is_null() {
        return GbStatus::Ok;
    }
    drop(Box::from_raw(ctx));
    GbStatus::Ok
}

/// `C := alpha*op(A)*op(B) + beta*C` through the context's native BLAS.
///
/// `order` and `trans_a`/`trans_b` take the CBLAS values (101/102 and
/// 111/112/113). Each buffer is passed with its length in elements; the
/// call is rejected before reaching native code if any buffer is shorter
/// than the shape and leading dimension require.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn gb_dgemm(
    ctx: *const GbContext,
    order: c_int,
    trans_a: c_int,
    trans_b: c_int,
    m: c_int,
    n: c_int,
    k: c_int,
    alpha: c_double,
    a: *const c_double,
    a_len: usize,
    lda: c_int,
    b: *const c_double,
    b_len: usize,
    ldb: c_int,
    beta: c_double,
    c: *mut c_double,
    c_len: usize,
    ldc: c_int,
) -> GbStatus {
    catch_panic(|| {
        if ctx.is_null() {
            set_last_error("null argument".to_string());
            return GbStatus::ErrorInvalidArgument;
        }
        let ctx = unsafe { &*ctx };

        let (order, trans_a, trans_b) = match parse_flags(order, trans_a, trans_b) {
            Ok(f) => f,
            Err(e) => return report(&e),
        };

        let (a, b, c) = match unsafe {
            (
                input_slice(a, a_len),
                input_slice(b, b_len),
                output_slice(c, c_len),
            )
        } {
            (Some(a), Some(b), Some(c)) => (a, b, c),
            _ => {
                set_last_error("null buffer with non-zero length".to_string());
                return GbStatus::ErrorInvalidArgument;
            }
        };

        match ctx.multiplier.dgemm(
            order, trans_a, trans_b, m, n, k, alpha, a, lda, b, ldb, beta, c, ldc,
        ) {
            Ok(()) => GbStatus::Ok,
            Err(e) => report(&e),
        }
    })
}

/// Retrieve the last error message.
///
/// Returns a pointer to a C string describing the most recent error on this
/// thread, or null if no error has occurred. The caller must free the
/// returned string with `gb_free_string`.
#[no_mangle]
pub extern "C" fn gb_last_error() -> *mut c_char {
    match error::take_last_error() {
        Some(e) => e.into_raw(),
        None => std::ptr::null_mut(),
    }
}

/// Free a string previously returned by `gb_last_error`.
#[no_mangle]
pub unsafe extern "C" fn gb_free_string(s: *mut c_char) {
    if !s.is_null() {
        drop(CString::from_raw(s));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_core::{BlasInt, MatrixMultiplier};

    /// Writes `alpha + beta` into the first `m * n` elements of `C`.
    #[derive(Debug)]
    struct Fill;

    impl MatrixMultiplier for Fill {
        fn name(&self) -> &str {
            "fill"
        }

        unsafe fn dgemm_raw(
            &self,
            _order: Order,
            _trans_a: Transpose,
            _trans_b: Transpose,
            m: BlasInt,
            n: BlasInt,
            _k: BlasInt,
            alpha: f64,
            _a: *const f64,
            _lda: BlasInt,
            _b: *const f64,
            _ldb: BlasInt,
            beta: f64,
            c: *mut f64,
            _ldc: BlasInt,
        ) {
            if alpha.is_nan() {
                panic!("provider failure");
            }
            for i in 0..(m * n) as usize {
                *c.add(i) = alpha + beta;
            }
        }
    }

    fn context() -> GbContext {
        GbContext::with_multiplier(Box::new(Fill))
    }

    fn last_error() -> String {
        let p = gb_last_error();
        assert!(!p.is_null());
        let s = unsafe { CStr::from_ptr(p) }.to_str().unwrap().to_string();
        unsafe { gb_free_string(p) };
        s
    }

    unsafe fn call(
        ctx: *const GbContext,
        order: c_int,
        m: c_int,
        alpha: f64,
        a: &[f64],
        lda: c_int,
        c: &mut [f64],
    ) -> GbStatus {
        gb_dgemm(
            ctx,
            order,
            111,
            111,
            m,
            2,
            2,
            alpha,
            a.as_ptr(),
            a.len(),
            lda,
            [1.0; 4].as_ptr(),
            4,
            2,
            0.5,
            c.as_mut_ptr(),
            c.len(),
            2,
        )
    }

    #[test]
    fn test_dgemm_reaches_provider() {
        let ctx = context();
        let mut c = vec![0.0; 4];
        let status = unsafe { call(&ctx, 101, 2, 2.0, &[1.0; 4], 2, &mut c) };
        assert_eq!(status, GbStatus::Ok);
        assert_eq!(c, vec![2.5; 4]);
    }

    #[test]
    fn test_dgemm_null_context() {
        let mut c = vec![0.0; 4];
        let status = unsafe { call(std::ptr::null(), 101, 2, 1.0, &[1.0; 4], 2, &mut c) };
        assert_eq!(status, GbStatus::ErrorInvalidArgument);
        assert_eq!(last_error(), "null argument");
    }

    #[test]
    fn test_dgemm_invalid_order() {
        let ctx = context();
        let mut c = vec![0.0; 4];
        let status = unsafe { call(&ctx, 7, 2, 1.0, &[1.0; 4], 2, &mut c) };
        assert_eq!(status, GbStatus::ErrorInvalidArgument);
        assert!(last_error().contains("order"));
        assert_eq!(c, vec![0.0; 4]);
    }

    #[test]
    fn test_dgemm_invalid_transpose() {
        let ctx = context();
        let mut c = vec![0.0; 4];
        let status = unsafe {
            gb_dgemm(
                &ctx,
                101,
                111,
                110,
                2,
                2,
                2,
                1.0,
                [1.0; 4].as_ptr(),
                4,
                2,
                [1.0; 4].as_ptr(),
                4,
                2,
                0.0,
                c.as_mut_ptr(),
                4,
                2,
            )
        };
        assert_eq!(status, GbStatus::ErrorInvalidArgument);
        assert!(last_error().contains("transpose"));
    }

    #[test]
    fn test_dgemm_short_buffer() {
        let ctx = context();
        let mut c = vec![0.0; 4];
        let status = unsafe { call(&ctx, 101, 2, 1.0, &[1.0; 3], 2, &mut c) };
        assert_eq!(status, GbStatus::ErrorBufferTooSmall);
        assert!(last_error().contains("buffer A"));
        assert_eq!(c, vec![0.0; 4]);
    }

    #[test]
    fn test_dgemm_bad_dimensions() {
        let ctx = context();
        let mut c = vec![0.0; 4];
        let status = unsafe { call(&ctx, 101, -2, 1.0, &[1.0; 4], 2, &mut c) };
        assert_eq!(status, GbStatus::ErrorInvalidDimension);
        let _ = last_error();

        let status = unsafe { call(&ctx, 101, 2, 1.0, &[1.0; 4], 1, &mut c) };
        assert_eq!(status, GbStatus::ErrorInvalidDimension);
        assert!(last_error().contains("leading dimension A=1"));
    }

    #[test]
    fn test_dgemm_null_buffer() {
        let ctx = context();
        let mut c = vec![0.0; 4];
        let status = unsafe {
            gb_dgemm(
                &ctx,
                101,
                111,
                111,
                2,
                2,
                2,
                1.0,
                std::ptr::null(),
                4,
                2,
                [1.0; 4].as_ptr(),
                4,
                2,
                0.0,
                c.as_mut_ptr(),
                4,
                2,
            )
        };
        assert_eq!(status, GbStatus::ErrorInvalidArgument);
        assert_eq!(last_error(), "null buffer with non-zero length");
    }

    #[test]
    fn test_dgemm_empty_operands_may_be_null() {
        // k = 0: A and B hold no elements
        let ctx = context();
        let mut c = vec![0.0; 4];
        let status = unsafe {
            gb_dgemm(
                &ctx,
                101,
                111,
                111,
                2,
                2,
                0,
                1.0,
                std::ptr::null(),
                0,
                1,
                std::ptr::null(),
                0,
                2,
                3.0,
                c.as_mut_ptr(),
                4,
                2,
            )
        };
        assert_eq!(status, GbStatus::Ok);
        assert_eq!(c, vec![4.0; 4]);
    }

    #[test]
    fn test_dgemm_provider_panic() {
        let ctx = context();
        let mut c = vec![0.0; 4];
        let status = unsafe { call(&ctx, 101, 2, f64::NAN, &[1.0; 4], 2, &mut c) };
        assert_eq!(status, GbStatus::ErrorInternal);
        assert_eq!(last_error(), "internal panic");
    }

    #[test]
    fn test_context_create_bad_library() {
        let path = CString::new("/nonexistent/libnot_a_blas.so").unwrap();
        let mut ctx: *mut GbContext = std::ptr::null_mut();
        let status = unsafe { gb_context_create(path.as_ptr(), &mut ctx) };
        assert_eq!(status, GbStatus::ErrorLibraryLoad);
        assert!(ctx.is_null());
        assert!(last_error().contains("libnot_a_blas"));
    }

    #[test]
    fn test_context_create_null_out() {
        let status = unsafe { gb_context_create(std::ptr::null(), std::ptr::null_mut()) };
        assert_eq!(status, GbStatus::ErrorInvalidArgument);
        assert_eq!(last_error(), "ctx_out is null");
    }

    #[test]
    fn test_destroy_and_free_null() {
        assert_eq!(
            unsafe { gb_context_destroy(std::ptr::null_mut()) },
            GbStatus::Ok
        );
        unsafe { gb_free_string(std::ptr::null_mut()) };
    }

    #[test]
    fn test_destroy_context() {
        let ctx = Box::into_raw(Box::new(context()));
        assert_eq!(unsafe { gb_context_destroy(ctx) }, GbStatus::Ok);
    }

    #[test]
    fn test_init_logging_idempotent() {
        assert_eq!(gb_init_logging(), GbStatus::Ok);
        assert_eq!(gb_init_logging(), GbStatus::Ok);
    }
}
