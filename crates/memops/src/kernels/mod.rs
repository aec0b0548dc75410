//! Per-tier kernels and the candidate table the dispatcher walks.
//!
//! Every kernel is the shared engine monomorphised at one vector width and,
//! for the SIMD tiers, compiled with that tier's target feature enabled.

use backend::{Candidate, VectorTier};

use crate::engine::Direction;

#[cfg(target_arch = "aarch64")]
pub(crate) mod aarch64;
pub(crate) mod portable;
#[cfg(target_arch = "x86_64")]
pub(crate) mod x86_64;

/// Uniform kernel signature: `(dst, src, n, direction) -> dst`.
///
/// # Safety
///
/// Callers uphold the engine contract (valid ranges; direction compatible
/// with any overlap) and only invoke a kernel whose tier is certified.
pub type KernelFn = unsafe fn(*mut u8, *const u8, usize, Direction) -> *mut u8;

/// Name of the scalar floor kernel.
pub const PORTABLE: &str = "portable";

/// Kernels ordered widest first. The last entry requires no vector unit.
#[cfg(target_arch = "x86_64")]
pub(crate) static CANDIDATES: [Candidate<KernelFn>; 4] = [
  Candidate::new("x86_64/avx512", VectorTier::V512, x86_64::avx512 as KernelFn),
  Candidate::new("x86_64/avx2", VectorTier::V256, x86_64::avx2 as KernelFn),
  Candidate::new("x86_64/sse2", VectorTier::V128, x86_64::sse2 as KernelFn),
  Candidate::new(PORTABLE, VectorTier::Scalar, portable::scalar as KernelFn),
];

/// Kernels ordered widest first. The last entry requires no vector unit.
#[cfg(target_arch = "aarch64")]
pub(crate) static CANDIDATES: [Candidate<KernelFn>; 2] = [
  Candidate::new("aarch64/neon", VectorTier::V128, aarch64::neon as KernelFn),
  Candidate::new(PORTABLE, VectorTier::Scalar, portable::scalar as KernelFn),
];

/// Kernels ordered widest first. The last entry requires no vector unit.
#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
pub(crate) static CANDIDATES: [Candidate<KernelFn>; 1] =
  [Candidate::new(PORTABLE, VectorTier::Scalar, portable::scalar as KernelFn)];
