//! x86_64 SIMD kernels.
//!
//! Each wrapper enables its tier's feature so the inlined engine emits
//! 16/32/64-byte vector moves.
//!
//! # Safety
//!
//! Only call a kernel after `backend::tier::detect()` certifies its tier.

use backend::VectorTier;

use crate::engine::{self, Direction};

const SSE2_WIDTH: usize = VectorTier::V128.width();
const AVX2_WIDTH: usize = VectorTier::V256.width();
const AVX512_WIDTH: usize = VectorTier::V512.width();

/// SSE2: 16-byte chunks.
///
/// # Safety
///
/// SSE2 must be available. See [`KernelFn`](super::KernelFn) for the rest.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse2(dst: *mut u8, src: *const u8, n: usize, direction: Direction) -> *mut u8 {
  // SAFETY: forwarded from the caller.
  unsafe { engine::run::<SSE2_WIDTH>(dst, src, n, direction) }
}

/// AVX2: 32-byte chunks.
///
/// # Safety
///
/// AVX and AVX2 must be available with OS-enabled YMM state.
#[target_feature(enable = "avx,avx2")]
pub(crate) unsafe fn avx2(dst: *mut u8, src: *const u8, n: usize, direction: Direction) -> *mut u8 {
  // SAFETY: forwarded from the caller.
  unsafe { engine::run::<AVX2_WIDTH>(dst, src, n, direction) }
}

/// AVX-512F: 64-byte chunks.
///
/// # Safety
///
/// AVX-512F must be available with OS-enabled ZMM state.
#[target_feature(enable = "avx512f")]
pub(crate) unsafe fn avx512(dst: *mut u8, src: *const u8, n: usize, direction: Direction) -> *mut u8 {
  // SAFETY: forwarded from the caller.
  unsafe { engine::run::<AVX512_WIDTH>(dst, src, n, direction) }
}
