//! Safe slice wrappers over the raw primitives.
//!
//! Same contracts as `<[u8]>::copy_from_slice` and `<[u8]>::copy_within`,
//! including the panics, but routed through the tiered kernels.

use core::ops::{Bound, RangeBounds};

use crate::{copy_bytes, move_bytes};

/// Copy all of `src` into `dst`.
///
/// # Panics
///
/// Panics if the slices differ in length.
///
/// ```
/// let src = [1u8, 2, 3, 4];
/// let mut dst = [0u8; 4];
/// memops::copy_from_slice(&mut dst, &src);
/// assert_eq!(dst, src);
/// ```
#[inline]
#[track_caller]
pub fn copy_from_slice(dst: &mut [u8], src: &[u8]) {
  if dst.len() != src.len() {
    len_mismatch_fail(dst.len(), src.len());
  }
  // SAFETY: both slices hold `src.len()` bytes, and a `&mut` never aliases a `&`.
  unsafe {
    copy_bytes(dst.as_mut_ptr(), src.as_ptr(), src.len());
  }
}

/// Copy `buf[src]` to `buf[dest..]`, correct for overlap.
///
/// # Panics
///
/// Panics if `src` is out of bounds, its start exceeds its end, or the
/// destination range `dest..dest + src.len()` does not fit in `buf`.
///
/// ```
/// let mut buf = *b"Hello, World!";
/// memops::copy_within(&mut buf, 1..5, 8);
/// assert_eq!(&buf, b"Hello, Wello!");
/// ```
#[track_caller]
pub fn copy_within<R: RangeBounds<usize>>(buf: &mut [u8], src: R, dest: usize) {
  let len = buf.len();
  let start = match src.start_bound() {
    Bound::Included(&start) => start,
    Bound::Excluded(&start) => start.checked_add(1).unwrap_or_else(|| start_overflow_fail()),
    Bound::Unbounded => 0,
  };
  let end = match src.end_bound() {
    Bound::Included(&end) => end.checked_add(1).unwrap_or_else(|| end_overflow_fail()),
    Bound::Excluded(&end) => end,
    Bound::Unbounded => len,
  };
  if start > end {
    index_order_fail(start, end);
  }
  if end > len {
    end_index_len_fail(end, len);
  }
  let count = end - start;
  if dest > len - count {
    dest_out_of_bounds_fail(dest, count, len);
  }

  let base = buf.as_mut_ptr();
  // SAFETY: `start + count <= len` and `dest + count <= len` were checked
  // above, and `move_bytes` tolerates any overlap.
  unsafe {
    move_bytes(base.add(dest), base.add(start), count);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Panic helpers
// ─────────────────────────────────────────────────────────────────────────────

#[cold]
#[inline(never)]
#[track_caller]
fn len_mismatch_fail(dst_len: usize, src_len: usize) -> ! {
  panic!("source slice length ({src_len}) does not match destination slice length ({dst_len})");
}

#[cold]
#[inline(never)]
#[track_caller]
fn index_order_fail(start: usize, end: usize) -> ! {
  panic!("slice index starts at {start} but ends at {end}");
}

#[cold]
#[inline(never)]
#[track_caller]
fn end_index_len_fail(end: usize, len: usize) -> ! {
  panic!("range end index {end} out of range for slice of length {len}");
}

#[cold]
#[inline(never)]
#[track_caller]
fn start_overflow_fail() -> ! {
  panic!("attempted to index slice from after maximum usize");
}

#[cold]
#[inline(never)]
#[track_caller]
fn end_overflow_fail() -> ! {
  panic!("attempted to index slice up to maximum usize");
}

#[cold]
#[inline(never)]
#[track_caller]
fn dest_out_of_bounds_fail(dest: usize, count: usize, len: usize) -> ! {
  panic!("dest is out of bounds: {dest} + {count} exceeds slice length {len}");
}
