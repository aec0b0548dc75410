//! Runtime-dispatched, vector-width-tiered memory copy and move.
//!
//! Two primitives with the `memcpy`/`memmove` contract:
//!
//! - [`copy_bytes`]: non-overlapping transfer
//! - [`move_bytes`]: transfer that is correct for any overlap
//!
//! On first use the widest tier the processor supports is certified and the
//! matching kernel is cached; later calls are one relaxed load plus an
//! indirect call.
//!
//! # Tiers
//!
//! | Tier | Width | x86_64 kernel | aarch64 kernel |
//! |------|-------|---------------|----------------|
//! | V512 | 64 B | `x86_64/avx512` | - |
//! | V256 | 32 B | `x86_64/avx2` | - |
//! | V128 | 16 B | `x86_64/sse2` | `aarch64/neon` |
//! | Scalar | 32 B chunks, baseline ISA | `portable` | `portable` |
//!
//! Every kernel runs the same greedy decomposition: groups of four vectors,
//! single vectors, then at most one chunk each of 32, 16, 8, 4, 2, 1 bytes.
//!
//! # Example
//!
//! ```rust
//! let src = [0x42u8; 100];
//! let mut dst = [0u8; 100];
//!
//! // SAFETY: both buffers hold 100 bytes and do not overlap.
//! let ret = unsafe { memops::copy_bytes(dst.as_mut_ptr(), src.as_ptr(), 100) };
//! assert_eq!(ret, dst.as_mut_ptr());
//! assert_eq!(dst, src);
//!
//! // Safe wrappers with `core` semantics.
//! let mut buf = *b"abcdefgh";
//! memops::copy_within(&mut buf, 0..6, 2);
//! assert_eq!(&buf, b"ababcdef");
//!
//! println!("memops backend: {}", memops::selected_backend());
//! ```
//!
//! # Configuration
//!
//! `MEMOPS_FORCE=portable|sse2|neon|avx2|avx512|auto` caps the tier (see
//! [`config`]). A cap never raises the tier above what the processor supports.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Without `std`, detection falls back to
//! raw CPUID on x86_64 and `MEMOPS_FORCE` is ignored:
//!
//! ```toml
//! [dependencies]
//! memops = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod config;
mod dispatch;
mod engine;
#[cfg(feature = "ffi")]
pub mod ffi;
mod introspect;
mod kernels;
mod slice;

#[cfg(test)]
mod proptests;

pub use backend::{ParseTierError, VectorTier};
pub use config::{MemopsConfig, MemopsForce};
pub use dispatch::{
  backend_for_tier, copy_bytes, copy_bytes_with_tier, move_bytes, move_bytes_with_tier, selected_backend,
};
pub use engine::Direction;
pub use introspect::DispatchInfo;
pub use slice::{copy_from_slice, copy_within};
