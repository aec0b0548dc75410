//! Scalar floor kernel.
//!
//! Compiled with no target feature, so it runs on any processor the crate
//! builds for. Chunks are 32 bytes; the backend lowers them to whatever
//! baseline moves the target guarantees.

use crate::engine::{self, Direction};

/// Chunk width of the scalar kernel.
pub(crate) const WIDTH: usize = 32;

/// # Safety
///
/// See [`KernelFn`](super::KernelFn).
pub(crate) unsafe fn scalar(dst: *mut u8, src: *const u8, n: usize, direction: Direction) -> *mut u8 {
  // SAFETY: forwarded from the caller.
  unsafe { engine::run::<WIDTH>(dst, src, n, direction) }
}
