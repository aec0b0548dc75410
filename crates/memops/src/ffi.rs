//! C ABI exports.
//!
//! Unmangled `memops_copy` / `memops_move` with the `memcpy`/`memmove`
//! signature, for harnesses that load the primitives from a shared library.
//! Build one with `cargo rustc -p memops --features ffi --crate-type cdylib`.

use core::ffi::c_void;

/// C entry point for [`copy_bytes`](crate::copy_bytes).
///
/// # Safety
///
/// Same contract as `memcpy`: valid, non-overlapping `n`-byte ranges.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn memops_copy(dst: *mut c_void, src: *const c_void, n: usize) -> *mut c_void {
  // SAFETY: forwarded from the caller.
  unsafe { crate::copy_bytes(dst.cast(), src.cast(), n).cast() }
}

/// C entry point for [`move_bytes`](crate::move_bytes).
///
/// # Safety
///
/// Same contract as `memmove`: valid `n`-byte ranges, overlap allowed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn memops_move(dst: *mut c_void, src: *const c_void, n: usize) -> *mut c_void {
  // SAFETY: forwarded from the caller.
  unsafe { crate::move_bytes(dst.cast(), src.cast(), n).cast() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn exports_round_trip_through_c_abi() {
    let copy: unsafe extern "C" fn(*mut c_void, *const c_void, usize) -> *mut c_void = memops_copy;
    let mv: unsafe extern "C" fn(*mut c_void, *const c_void, usize) -> *mut c_void = memops_move;

    let src = [9u8; 40];
    let mut dst = [0u8; 40];
    // SAFETY: disjoint 40-byte buffers.
    let ret = unsafe { copy(dst.as_mut_ptr().cast(), src.as_ptr().cast(), 40) };
    assert_eq!(ret.cast::<u8>(), dst.as_mut_ptr());
    assert_eq!(dst, src);

    let mut buf: [u8; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
    let base = buf.as_mut_ptr();
    // SAFETY: both ranges lie inside `buf`.
    unsafe { mv(base.add(2).cast(), base.cast(), 6) };
    assert_eq!(buf, [1, 2, 1, 2, 3, 4, 5, 6]);
  }
}
