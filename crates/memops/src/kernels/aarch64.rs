//! aarch64 NEON kernel.

use backend::VectorTier;

use crate::engine::{self, Direction};

const NEON_WIDTH: usize = VectorTier::V128.width();

/// NEON: 16-byte chunks.
///
/// # Safety
///
/// NEON must be available. See [`KernelFn`](super::KernelFn) for the rest.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn neon(dst: *mut u8, src: *const u8, n: usize, direction: Direction) -> *mut u8 {
  // SAFETY: forwarded from the caller.
  unsafe { engine::run::<NEON_WIDTH>(dst, src, n, direction) }
}
