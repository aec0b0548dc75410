//! CPU capability detection for memops.
//!
//! This crate is the **single source of truth** for "which vector widths may
//! run here". Kernel selection in `backend` and `memops` only ever asks
//! [`caps()`]; nothing else issues CPUID or feature queries.
//!
//! # Core Types
//!
//! - [`Caps`]: What load/store instructions can run on this machine
//! - [`Arch`]: The compilation target's architecture family
//!
//! # Main Entry Point
//!
//! ```
//! let caps = platform::caps();
//!
//! #[cfg(target_arch = "x86_64")]
//! if caps.has(platform::caps::x86::AVX2_READY) {
//!   // 32-byte loads/stores are safe
//! }
//! # let _ = caps;
//! ```
//!
//! # Design
//!
//! 1. **One API**: callers query `platform::caps()` instead of doing ad-hoc detection.
//! 2. **Zero-cost when possible**: compile-time features are folded in via `cfg!`.
//! 3. **Cached otherwise**: runtime detection is memoized in one relaxed atomic.
//! 4. **Miri-safe**: under Miri, always returns `Caps::NONE`.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
mod detect;

pub use caps::{Arch, Caps};
pub use detect::{caps, caps_static, detect_uncached, has_override, set_caps_override};
