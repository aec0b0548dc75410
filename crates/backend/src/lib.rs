//! Backend crate: vector tiers and kernel dispatch for memops.
//!
//! This crate sits between capability detection and the kernels:
//!
//! - **Tiers**: [`VectorTier`] ranks vector widths; [`tier::detect`] certifies
//!   the widest one the running processor supports
//! - **Dispatch**: [`dispatch::Dispatcher`] picks the widest eligible kernel
//!   from a static table and caches the choice
//! - **Capabilities**: Re-exports from `platform` for tier derivation
//!
//! # Architecture
//!
//! Selection runs once per dispatcher. The first call derives the tier,
//! walks the candidate table widest first, and records the winning index.
//! Every later call is one relaxed load and one indirect call.
//!
//! ```
//! use backend::{VectorTier, tier};
//!
//! let certified = tier::detect();
//! assert!(tier::supports(VectorTier::Scalar));
//! assert!(certified.width() <= 64);
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
pub mod dispatch;
pub mod tier;

pub use dispatch::{Candidate, Dispatcher, Selected};
pub use platform;
pub use tier::{ParseTierError, VectorTier};
