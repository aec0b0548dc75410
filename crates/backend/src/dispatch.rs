//! Kernel dispatch: selection and caching.
//!
//! This module provides the dispatch primitives memops builds on:
//!
//! - [`Candidate`]: A kernel with a minimum vector tier
//! - [`Selected`]: The result of kernel selection
//! - [`select`]: Choose the widest eligible kernel from a candidate table
//! - [`Dispatcher`]: Memoize the selection for a static candidate table
//!
//! # Usage
//!
//! Algorithm crates register kernels as a static table ordered widest first,
//! ending with a scalar entry:
//!
//! ```ignore
//! use backend::{VectorTier, dispatch::{Candidate, Dispatcher}};
//!
//! static CANDIDATES: [Candidate<KernelFn>; 3] = [
//!   Candidate::new("x86_64/avx2", VectorTier::V256, avx2_kernel),
//!   Candidate::new("x86_64/sse2", VectorTier::V128, sse2_kernel),
//!   Candidate::new("portable", VectorTier::Scalar, portable_kernel),
//! ];
//!
//! static DISPATCH: Dispatcher<KernelFn> = Dispatcher::new("copy", &CANDIDATES, backend::tier::detect);
//! ```
//!
//! # Caching
//!
//! A [`Dispatcher`] stores the *index* of the chosen candidate in an
//! `AtomicU8`. The table is immutable and static, so reading the index back
//! needs no synchronization beyond a relaxed load, and no function pointer
//! is ever round-tripped through an integer.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::tier::VectorTier;

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate kernel with a tier requirement.
///
/// Candidates are ordered from widest to narrowest. Selection takes the first
/// candidate whose requirement does not exceed the available tier.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "x86_64/avx2").
  pub name: &'static str,
  /// Minimum tier this kernel needs.
  pub requires: VectorTier,
  /// The kernel function pointer.
  pub func: F,
}

impl<F> Candidate<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: VectorTier, func: F) -> Self {
    Self { name, requires, func }
  }
}

impl<F: Copy> Candidate<F> {
  #[inline]
  #[must_use]
  pub const fn selected(&self) -> Selected<F> {
    Selected::new(self.name, self.func)
  }
}

/// The result of kernel selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Human-readable name of the selected kernel.
  pub name: &'static str,
  /// The selected kernel function.
  pub func: F,
}

impl<F> Selected<F> {
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Index of the first candidate eligible at `tier`.
///
/// Falls back to the last candidate, which by convention requires
/// [`VectorTier::Scalar`]. Returns `None` only for an empty table.
#[inline]
#[must_use]
pub fn select_index<F>(tier: VectorTier, candidates: &[Candidate<F>]) -> Option<usize> {
  candidates
    .iter()
    .position(|candidate| candidate.requires <= tier)
    .or_else(|| candidates.len().checked_sub(1))
}

/// Select the best kernel from a candidate list.
///
/// # Panics
///
/// Panics if `candidates` is empty.
#[inline]
#[must_use]
pub fn select<F: Copy>(tier: VectorTier, candidates: &[Candidate<F>]) -> Selected<F> {
  match select_index(tier, candidates).and_then(|index| candidates.get(index)) {
    Some(candidate) => candidate.selected(),
    None => empty_table(),
  }
}

#[cold]
#[track_caller]
fn empty_table() -> ! {
  panic!("candidate table must end with a scalar fallback");
}

// ─────────────────────────────────────────────────────────────────────────────
// Dispatcher
// ─────────────────────────────────────────────────────────────────────────────

const UNRESOLVED: u8 = u8::MAX;

/// Memoized selection over a static candidate table.
///
/// The first [`get`](Self::get) asks the tier source, selects, and records the
/// winning index. Racing first calls each select and store the same index.
///
/// ```ignore
/// static DISPATCH: Dispatcher<CopyFn> = Dispatcher::new("copy", &CANDIDATES, backend::tier::detect);
///
/// fn copy(dst: *mut u8, src: *const u8, n: usize) {
///   let selected = DISPATCH.get();
///   unsafe { (selected.func)(dst, src, n) };
/// }
/// ```
pub struct Dispatcher<F: 'static> {
  #[cfg_attr(not(feature = "log"), allow(dead_code))]
  label: &'static str,
  candidates: &'static [Candidate<F>],
  tier: fn() -> VectorTier,
  slot: AtomicU8,
}

impl<F: Copy + 'static> Dispatcher<F> {
  /// Create a dispatcher over `candidates`, consulting `tier` on first use.
  ///
  /// # Panics
  ///
  /// Panics (at compile time when used in a `static`) if the table is empty
  /// or has 255 or more entries.
  #[must_use]
  pub const fn new(label: &'static str, candidates: &'static [Candidate<F>], tier: fn() -> VectorTier) -> Self {
    assert!(!candidates.is_empty(), "candidate table must not be empty");
    assert!(candidates.len() < UNRESOLVED as usize, "candidate table too large");
    Self {
      label,
      candidates,
      tier,
      slot: AtomicU8::new(UNRESOLVED),
    }
  }

  /// Get the selected kernel, resolving on first call.
  ///
  /// While `platform::set_caps_override` is in effect every call selects
  /// afresh from the tier source and the cached index is neither read nor
  /// written.
  #[inline]
  #[must_use]
  pub fn get(&self) -> Selected<F> {
    if platform::has_override() {
      return self.select_overridden();
    }
    let index = self.slot.load(Ordering::Relaxed);
    if let Some(candidate) = self.candidates.get(usize::from(index)) {
      return candidate.selected();
    }
    self.resolve()
  }

  #[cold]
  #[inline(never)]
  fn resolve(&self) -> Selected<F> {
    let tier = (self.tier)();
    let Some(index) = select_index(tier, self.candidates) else {
      empty_table()
    };
    let Some(candidate) = self.candidates.get(index) else {
      empty_table()
    };

    #[cfg(feature = "log")]
    log::debug!(
      "{}: selected kernel {} (tier {}, requires {})",
      self.label,
      candidate.name,
      tier,
      candidate.requires
    );

    // `new` bounds the table below UNRESOLVED, so the index fits.
    self.slot.store(index as u8, Ordering::Relaxed);
    candidate.selected()
  }

  #[cold]
  #[inline(never)]
  fn select_overridden(&self) -> Selected<F> {
    select((self.tier)(), self.candidates)
  }

  /// Name of the selected kernel.
  #[inline]
  #[must_use]
  pub fn backend_name(&self) -> &'static str {
    self.get().name
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  type TestFn = fn() -> u32;

  fn scalar() -> u32 {
    0
  }

  fn narrow() -> u32 {
    16
  }

  fn wide() -> u32 {
    64
  }

  static TABLE: [Candidate<TestFn>; 3] = [
    Candidate::new("wide", VectorTier::V512, wide),
    Candidate::new("narrow", VectorTier::V128, narrow),
    Candidate::new("scalar", VectorTier::Scalar, scalar),
  ];

  #[test]
  fn test_candidate_creation() {
    let c: Candidate<TestFn> = Candidate::new("test", VectorTier::V256, scalar);
    assert_eq!(c.name, "test");
    assert_eq!(c.requires, VectorTier::V256);
  }

  #[test]
  fn test_select_scalar_fallback() {
    let selected = select(VectorTier::Scalar, &TABLE);
    assert_eq!(selected.name, "scalar");
    assert_eq!((selected.func)(), 0);
  }

  #[test]
  fn test_select_widest_eligible() {
    assert_eq!(select(VectorTier::V512, &TABLE).name, "wide");
    assert_eq!((select(VectorTier::V512, &TABLE).func)(), 64);
  }

  #[test]
  fn test_select_skips_gaps() {
    // No V256 entry: V256 falls to the next narrower kernel.
    assert_eq!(select(VectorTier::V256, &TABLE).name, "narrow");
    assert_eq!(select(VectorTier::V128, &TABLE).name, "narrow");
  }

  #[test]
  fn test_select_without_scalar_entry_uses_last() {
    let table: &[Candidate<TestFn>] = &[Candidate::new("only", VectorTier::V256, wide)];
    assert_eq!(select_index(VectorTier::Scalar, table), Some(0));
  }

  #[test]
  fn test_select_index_empty() {
    let table: &[Candidate<TestFn>] = &[];
    assert_eq!(select_index(VectorTier::V512, table), None);
  }

  #[test]
  #[should_panic(expected = "scalar fallback")]
  fn test_select_empty_panics() {
    let table: &[Candidate<TestFn>] = &[];
    let _ = select(VectorTier::Scalar, table);
  }

  fn tier_v128() -> VectorTier {
    VectorTier::V128
  }

  fn tier_scalar() -> VectorTier {
    VectorTier::Scalar
  }

  #[test]
  fn test_dispatcher_caches_index() {
    static DISPATCH: Dispatcher<TestFn> = Dispatcher::new("test", &TABLE, tier_v128);

    assert_eq!(DISPATCH.slot.load(Ordering::Relaxed), UNRESOLVED);
    let selected = DISPATCH.get();
    assert_eq!(selected.name, "narrow");
    assert_eq!(DISPATCH.slot.load(Ordering::Relaxed), 1);

    let again = DISPATCH.get();
    assert_eq!(again.name, "narrow");
    assert_eq!((again.func)(), 16);
  }

  #[test]
  fn test_dispatcher_backend_name() {
    static DISPATCH: Dispatcher<TestFn> = Dispatcher::new("test", &TABLE, tier_scalar);
    assert_eq!(DISPATCH.backend_name(), "scalar");
  }

  #[test]
  #[cfg(not(miri))]
  fn test_dispatcher_concurrent_first_use() {
    extern crate std;
    use std::{thread, vec::Vec};

    static DISPATCH: Dispatcher<TestFn> = Dispatcher::new("race", &TABLE, tier_v128);

    let handles: Vec<_> = (0..8).map(|_| thread::spawn(|| DISPATCH.backend_name())).collect();
    for handle in handles {
      assert_eq!(handle.join().unwrap(), "narrow");
    }
  }
}
