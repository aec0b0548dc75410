//! Runtime CPU detection.
//!
//! This module provides [`caps()`], the memoized capability query every
//! dispatch decision is built on. It handles:
//!
//! - Compile-time detection (via `cfg!(target_feature = "...")`)
//! - Runtime detection (feature query with `std`, raw CPUID without)
//! - Caching in a single relaxed atomic word
//! - User-supplied overrides for bare metal and testing
//! - Miri fallback (always returns `Caps::NONE`)
//!
//! # Caching
//!
//! The detected bitset is stored in one `AtomicU64` with bit 63 marking
//! "computed". There is no lock and no init state machine: two threads racing
//! on first use both run detection and both store the same word. Detection is
//! deterministic and hardware capabilities cannot change while the process
//! runs, so the duplicate work is the whole cost of the race.

use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::caps::Caps;

mod arch {
  #[cfg(target_arch = "aarch64")]
  pub mod aarch64;
  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  pub mod x86;
}

mod compile_time;

pub use compile_time::caps_static;

// ─────────────────────────────────────────────────────────────────────────────
// Cache
// ─────────────────────────────────────────────────────────────────────────────

/// Marks the cached word as computed. Never a feature bit (see `Caps::MAX_FEATURE_BIT`).
const COMPUTED: u64 = 1 << 63;

static CACHED: AtomicU64 = AtomicU64::new(0);

#[inline]
fn cached_or_detect() -> Caps {
  let word = CACHED.load(Ordering::Relaxed);
  if word & COMPUTED != 0 {
    return Caps(word & !COMPUTED);
  }
  detect_and_store()
}

#[cold]
#[inline(never)]
fn detect_and_store() -> Caps {
  let caps = detect_uncached();
  CACHED.store(caps.0 | COMPUTED, Ordering::Relaxed);
  caps
}

// ─────────────────────────────────────────────────────────────────────────────
// Override Support
// ─────────────────────────────────────────────────────────────────────────────

static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);
static OVERRIDE_BITS: AtomicU64 = AtomicU64::new(0);

/// Set or clear the capabilities override.
///
/// When set, [`caps()`] returns the override instead of detected
/// capabilities, and the tier and dispatch caches built on it are bypassed
/// until the override is cleared. Pass `None` to resume detection.
///
/// An override is trusted: setting bits the hardware lacks makes the
/// dispatcher select kernels that fault. Use it to *remove* features in
/// tests, or to describe a known bare-metal CPU.
pub fn set_caps_override(value: Option<Caps>) {
  match value {
    Some(caps) => {
      OVERRIDE_BITS.store(caps.0, Ordering::Release);
      OVERRIDE_SET.store(true, Ordering::Release);
    }
    None => OVERRIDE_SET.store(false, Ordering::Release),
  }
}

/// Check if an override is currently set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  OVERRIDE_SET.load(Ordering::Acquire)
}

#[inline]
fn get_override() -> Option<Caps> {
  if !OVERRIDE_SET.load(Ordering::Acquire) {
    return None;
  }
  Some(Caps(OVERRIDE_BITS.load(Ordering::Acquire)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Main API
// ─────────────────────────────────────────────────────────────────────────────

/// Get the CPU capabilities of this process.
///
/// The first call performs detection; later calls are one relaxed load.
///
/// # Miri
///
/// Under Miri, always returns `Caps::NONE` so only portable code runs.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  #[cfg(miri)]
  {
    Caps::NONE
  }

  #[cfg(not(miri))]
  {
    if let Some(caps) = get_override() {
      return caps;
    }
    cached_or_detect()
  }
}

/// Detect capabilities without caching or overrides.
#[must_use]
pub fn detect_uncached() -> Caps {
  #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
  {
    caps_static().union(arch::x86::runtime())
  }

  #[cfg(target_arch = "aarch64")]
  {
    caps_static().union(arch::aarch64::runtime())
  }

  #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
  {
    caps_static()
  }
}

#[cfg(test)]
mod tests;
