use crate::error::{BlasError, Result};
use crate::order::{Order, Transpose};
use crate::BlasInt;

/// Storage footprint of one gemm operand as the native routine will read it.
///
/// `rows` and `cols` are the dimensions of the matrix as stored in the
/// buffer, i.e. after undoing any transpose flag. For a row-major buffer
/// the leading dimension bounds `cols`; for column-major it bounds `rows`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandLayout {
    pub name: &'static str,
    pub order: Order,
    pub rows: usize,
    pub cols: usize,
    pub ld: BlasInt,
}

impl OperandLayout {
    /// Layout of an operand whose logical (post-`op`) shape is `rows x cols`.
    pub fn new(
        name: &'static str,
        order: Order,
        trans: Transpose,
        rows: usize,
        cols: usize,
        ld: BlasInt,
    ) -> Self {
        let (rows, cols) = if trans.is_transposed() {
            (cols, rows)
        } else {
            (rows, cols)
        };
        OperandLayout {
            name,
            order,
            rows,
            cols,
            ld,
        }
    }

    /// Extent that `ld` must cover (the contiguous direction).
    pub fn inner(&self) -> usize {
        match self.order {
            Order::RowMajor => self.cols,
            Order::ColMajor => self.rows,
        }
    }

    /// Number of `ld`-strided lines in the buffer.
    pub fn outer(&self) -> usize {
        match self.order {
            Order::RowMajor => self.rows,
            Order::ColMajor => self.cols,
        }
    }

    /// Smallest leading dimension CBLAS accepts: `max(1, inner)`.
    pub fn min_leading_dim(&self) -> usize {
        self.inner().max(1)
    }

    /// Smallest buffer length covering every element the routine may touch.
    ///
    /// Empty shapes need no storage. Otherwise the last line only has to
    /// reach `inner` elements, so sub-views of larger allocations fit.
    pub fn min_len(&self) -> Result<usize> {
        if self.rows == 0 || self.cols == 0 {
            return Ok(0);
        }
        let overflow = || BlasError::SizeOverflow { name: self.name };
        let ld = usize::try_from(self.ld).map_err(|_| overflow())?;
        ld.checked_mul(self.outer() - 1)
            .and_then(|n| n.checked_add(self.inner()))
            .ok_or_else(overflow)
    }

    /// Checks the leading dimension and that `len` elements are enough.
    pub fn check(&self, len: usize) -> Result<()> {
        let min = self.min_leading_dim();
        if (self.ld as i64) < min as i64 {
            return Err(BlasError::LeadingDimensionTooSmall {
                name: self.name,
                value: self.ld,
                min: min as BlasInt,
            });
        }
        let required = self.min_len()?;
        if len < required {
            return Err(BlasError::BufferTooSmall {
                name: self.name,
                len,
                required,
            });
        }
        Ok(())
    }
}

fn dimension(name: &'static str, value: BlasInt) -> Result<usize> {
    usize::try_from(value).map_err(|_| BlasError::NegativeDimension { name, value })
}

/// Validate a full set of dgemm arguments against the CBLAS rules.
///
/// - `m`, `n`, `k` must be non-negative
/// - `op(A)` is `m x k`, `op(B)` is `k x n`, `C` is `m x n`
/// - each leading dimension must be at least `max(1, inner extent)`
/// - each buffer must be at least `ld * (outer - 1) + inner` long
#[allow(clippy::too_many_arguments)]
pub fn validate_gemm(
    order: Order,
    trans_a: Transpose,
    trans_b: Transpose,
    m: BlasInt,
    n: BlasInt,
    k: BlasInt,
    a_len: usize,
    lda: BlasInt,
    b_len: usize,
    ldb: BlasInt,
    c_len: usize,
    ldc: BlasInt,
) -> Result<()> {
    let m = dimension("m", m)?;
    let n = dimension("n", n)?;
    let k = dimension("k", k)?;

    OperandLayout::new("A", order, trans_a, m, k, lda).check(a_len)?;
    OperandLayout::new("B", order, trans_b, k, n, ldb).check(b_len)?;
    OperandLayout::new("C", order, Transpose::NoTrans, m, n, ldc).check(c_len)?;
    Ok(())
}
