//! Public copy/move entry points.
//!
//! Both primitives resolve their kernel through one process-wide
//! [`Dispatcher`]. The first call certifies the tier, applies the
//! `MEMOPS_FORCE` cap, and records the winning table index; every later call
//! is a relaxed load plus an indirect call.

use backend::{Dispatcher, Selected, VectorTier, dispatch::select, tier};

use crate::{
  config,
  engine::Direction,
  kernels::{CANDIDATES, KernelFn},
};

static DISPATCH: Dispatcher<KernelFn> = Dispatcher::new("memops", &CANDIDATES, config::effective_tier);

#[inline]
fn kernel() -> KernelFn {
  DISPATCH.get().func
}

/// Kernel for an explicit tier, clamped to the certified tier.
#[inline]
fn kernel_for(cap: VectorTier) -> Selected<KernelFn> {
  select(cap.min(tier::detect()), &CANDIDATES)
}

/// Direction a move needs, or `None` when there is nothing to do.
///
/// Forward whenever the destination starts below the source or past its
/// end; backward only when it starts strictly inside the source range.
#[inline]
fn move_direction(dst: usize, src: usize, n: usize) -> Option<Direction> {
  if dst == src {
    None
  } else if dst < src || dst - src >= n {
    Some(Direction::Forward)
  } else {
    Some(Direction::Backward)
  }
}

/// Copy `n` bytes from `src` to `dst`. Returns `dst`.
///
/// # Safety
///
/// - `src` must be valid for reads of `n` bytes.
/// - `dst` must be valid for writes of `n` bytes.
/// - The two ranges must not overlap. Use [`move_bytes`] when they may.
///
/// No alignment is required. With `n == 0` nothing is read or written.
#[inline]
pub unsafe fn copy_bytes(dst: *mut u8, src: *const u8, n: usize) -> *mut u8 {
  // SAFETY: forwarded from the caller; the dispatcher only yields certified kernels.
  unsafe { kernel()(dst, src, n, Direction::Forward) }
}

/// Copy `n` bytes from `src` to `dst`, correct for any overlap. Returns `dst`.
///
/// # Safety
///
/// - `src` must be valid for reads of `n` bytes.
/// - `dst` must be valid for writes of `n` bytes.
///
/// No alignment is required. With `n == 0` or `dst == src` nothing is
/// read or written.
#[inline]
pub unsafe fn move_bytes(dst: *mut u8, src: *const u8, n: usize) -> *mut u8 {
  match move_direction(dst.addr(), src.addr(), n) {
    None => dst,
    // SAFETY: dst is below src or past its end, so a forward copy reads
    // every source byte before overwriting it.
    Some(Direction::Forward) => unsafe { copy_bytes(dst, src, n) },
    // SAFETY: dst overlaps src from above; a backward copy writes the high
    // end first.
    Some(Direction::Backward) => unsafe { kernel()(dst, src, n, Direction::Backward) },
  }
}

/// [`copy_bytes`] using at most `tier`.
///
/// The cap is clamped to the certified tier, so asking for a wider tier than
/// the processor supports runs the certified one instead.
///
/// # Safety
///
/// Same contract as [`copy_bytes`].
#[inline]
pub unsafe fn copy_bytes_with_tier(tier: VectorTier, dst: *mut u8, src: *const u8, n: usize) -> *mut u8 {
  // SAFETY: forwarded from the caller; `kernel_for` clamps to the certified tier.
  unsafe { (kernel_for(tier).func)(dst, src, n, Direction::Forward) }
}

/// [`move_bytes`] using at most `tier`.
///
/// # Safety
///
/// Same contract as [`move_bytes`].
#[inline]
pub unsafe fn move_bytes_with_tier(tier: VectorTier, dst: *mut u8, src: *const u8, n: usize) -> *mut u8 {
  match move_direction(dst.addr(), src.addr(), n) {
    None => dst,
    // SAFETY: forwarded from the caller; the direction matches the overlap.
    Some(direction) => unsafe { (kernel_for(tier).func)(dst, src, n, direction) },
  }
}

/// Name of the kernel [`copy_bytes`] and [`move_bytes`] use, e.g. `"x86_64/avx2"`.
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  DISPATCH.backend_name()
}

/// Name of the kernel a capped call would use.
#[inline]
#[must_use]
pub fn backend_for_tier(tier: VectorTier) -> &'static str {
  kernel_for(tier).name
}
