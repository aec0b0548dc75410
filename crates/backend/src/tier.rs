//! Vector width tiers.
//!
//! A tier is the widest load/store the running processor is certified to
//! execute. Higher tiers move more bytes per instruction but have stricter
//! hardware requirements.
//!
//! # Tier Overview
//!
//! | Tier | Ordinal | Width | x86/x86_64 | aarch64 |
//! |------|---------|-------|------------|---------|
//! | Scalar | 0 | none | always | always |
//! | V128 | 1 | 16 B | SSE2 | NEON |
//! | V256 | 2 | 32 B | AVX + AVX2 | - |
//! | V512 | 3 | 64 B | AVX-512F | - |
//!
//! # Certification
//!
//! [`detect()`] derives the tier from `platform::caps()` once per process and
//! memoizes it in a relaxed atomic. Concurrent first calls may each derive it;
//! they compute the same ordinal from the same capabilities, so whichever
//! store lands last is indistinguishable from the first.

use core::{
  fmt,
  str::FromStr,
  sync::atomic::{AtomicU8, Ordering},
};

use crate::caps::{Caps, aarch64, x86};

/// Vector width tier.
///
/// Tiers are ordered from lowest (always available) to highest. Comparisons
/// like `tier >= VectorTier::V256` read as "32-byte vectors are usable".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum VectorTier {
  /// No vector unit required. The unconditional floor.
  #[default]
  Scalar = 0,
  /// 16-byte vectors (SSE2, NEON).
  V128 = 1,
  /// 32-byte vectors (AVX2).
  V256 = 2,
  /// 64-byte vectors (AVX-512F).
  V512 = 3,
}

impl VectorTier {
  /// All tiers in ascending order.
  pub const ALL: [Self; 4] = [Self::Scalar, Self::V128, Self::V256, Self::V512];

  /// Convert to the ordinal value.
  #[inline]
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    self as u8
  }

  /// Convert from an ordinal. Values above 3 are not tiers.
  #[inline]
  #[must_use]
  pub const fn from_u8(value: u8) -> Option<Self> {
    match value {
      0 => Some(Self::Scalar),
      1 => Some(Self::V128),
      2 => Some(Self::V256),
      3 => Some(Self::V512),
      _ => None,
    }
  }

  /// Byte width of one vector load/store at this tier (0 for scalar).
  #[inline]
  #[must_use]
  pub const fn width(self) -> usize {
    match self {
      Self::Scalar => 0,
      Self::V128 => 16,
      Self::V256 => 32,
      Self::V512 => 64,
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Scalar => "scalar",
      Self::V128 => "v128",
      Self::V256 => "v256",
      Self::V512 => "v512",
    }
  }

  /// Lower of two tiers.
  #[inline]
  #[must_use]
  pub const fn min(self, other: Self) -> Self {
    if (self as u8) <= (other as u8) { self } else { other }
  }

  /// Derive the tier a capability set certifies.
  ///
  /// Tested widest first; each tier's requirement stands on its own.
  #[must_use]
  pub const fn from_caps(caps: Caps) -> Self {
    if caps.has(x86::AVX512_READY) {
      Self::V512
    } else if caps.has(x86::AVX2_READY) {
      Self::V256
    } else if caps.has(x86::SSE2) || caps.has(aarch64::NEON) {
      Self::V128
    } else {
      Self::Scalar
    }
  }
}

impl fmt::Display for VectorTier {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Error returned when a string names no tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseTierError;

impl fmt::Display for ParseTierError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("expected one of: scalar, sse2, neon, avx2, avx512, tier0-tier3")
  }
}

impl core::error::Error for ParseTierError {}

impl FromStr for VectorTier {
  type Err = ParseTierError;

  /// Accepts tier names, ordinals, and the instruction sets that back them.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    let matches = |names: &[&str]| names.iter().any(|name| s.eq_ignore_ascii_case(name));

    if matches(&["scalar", "portable", "none", "tier0", "0"]) {
      Ok(Self::Scalar)
    } else if matches(&["v128", "sse2", "neon", "tier1", "1"]) {
      Ok(Self::V128)
    } else if matches(&["v256", "avx2", "tier2", "2"]) {
      Ok(Self::V256)
    } else if matches(&["v512", "avx512", "avx512f", "tier3", "3"]) {
      Ok(Self::V512)
    } else {
      Err(ParseTierError)
    }
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Certified Tier
// ─────────────────────────────────────────────────────────────────────────────

const UNSET: u8 = u8::MAX;

static CERTIFIED: AtomicU8 = AtomicU8::new(UNSET);

/// Highest tier the running processor supports.
///
/// Never fails: absent every vector feature, this is [`VectorTier::Scalar`].
/// While a capability override (`platform::set_caps_override`) is installed
/// the tier is derived from it on every call and the memo is left alone.
#[inline]
#[must_use]
pub fn detect() -> VectorTier {
  if platform::has_override() {
    return detect_uncached();
  }
  if let Some(tier) = VectorTier::from_u8(CERTIFIED.load(Ordering::Relaxed)) {
    return tier;
  }
  certify()
}

#[cold]
#[inline(never)]
fn certify() -> VectorTier {
  let tier = detect_uncached();
  CERTIFIED.store(tier.as_u8(), Ordering::Relaxed);
  tier
}

/// Derive the tier from current capabilities, bypassing the memo.
#[inline]
#[must_use]
pub fn detect_uncached() -> VectorTier {
  VectorTier::from_caps(platform::caps())
}

/// `true` when `tier` is at or below the certified tier.
#[inline]
#[must_use]
pub fn supports(tier: VectorTier) -> bool {
  detect() >= tier
}
