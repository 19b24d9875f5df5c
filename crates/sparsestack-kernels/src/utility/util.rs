//! Utility constants and index conversions shared by the kernels
//
// The thresholds decide when a kernel switches from a serial loop to rayon
// parallel iterators. Below them the scheduling overhead dominates.

/// Stripe/block size for parallel scans over entry slots
pub const STRIPE: usize = 8192;
/// Threshold on dense rows x cols above which dense scans run in parallel
pub const SMALL_DIM_LIMIT: usize = 2048 * 64;
/// Threshold on nnz above which sparse scans and sorts run in parallel
pub const SMALL_NNZ_LIMIT: usize = 32 * 1024;

/// Convert i64 to usize, asserting non-negativity.
#[inline]
#[must_use]
pub fn i64_to_usize(x: i64) -> usize {
    debug_assert!(x >= 0);
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    {
        x as usize
    }
}

/// Convert usize to i64, asserting it fits.
#[inline]
#[must_use]
pub fn usize_to_i64(x: usize) -> i64 {
    debug_assert!(i64::try_from(x).is_ok());
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    {
        x as i64
    }
}
