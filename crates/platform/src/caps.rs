//! CPU capability representation.
//!
//! [`Caps`] answers one question: "which vector load/store widths may this
//! process legally execute?" Each bit is one ISA extension; bits are grouped
//! by architecture but the API is uniform across targets.
//!
//! # Bit Layout
//!
//! - Bits 0-31: x86/x86_64 features
//! - Bits 32-47: aarch64 features
//! - Bit 63: reserved (used by the detection cache as its "computed" marker)

// ─────────────────────────────────────────────────────────────────────────────
// Core Capability Type
// ─────────────────────────────────────────────────────────────────────────────

/// CPU capabilities: a 64-bit feature bitset.
///
/// `Caps` is `Copy`, `Send`, and `Sync`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// Empty capability set (no features).
  pub const NONE: Self = Self(0);

  /// Highest bit a feature may occupy. Bit 63 belongs to the detection cache.
  pub(crate) const MAX_FEATURE_BIT: u8 = 62;

  /// Create a capability set from a raw word.
  ///
  /// The reserved bit 63 is masked off.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(word: u64) -> Self {
    Self(word & !(1u64 << 63))
  }

  /// Check if all features in `required` are present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    (self.0 & required.0) == required.0
  }

  /// Union of two capability sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Intersection of two capability sets.
  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Count the number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// Create a capability set with a single bit set.
  ///
  /// # Panics
  ///
  /// Panics (at compile time for constants) if `bit` is the reserved bit 63 or above.
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    assert!(bit <= Self::MAX_FEATURE_BIT, "capability bit out of range");
    Self(1u64 << bit)
  }

  /// Check if a specific bit is set.
  #[inline]
  #[must_use]
  pub const fn has_bit(self, bit: u8) -> bool {
    bit < 64 && (self.0 & (1u64 << bit)) != 0
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self::Output {
    self.union(rhs)
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self::Output {
    self.intersection(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    *self = self.union(rhs);
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Architecture Identification
// ─────────────────────────────────────────────────────────────────────────────

/// Target architecture enumeration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  #[default]
  Other,
}

impl Arch {
  /// Get the architecture for the current compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    #[cfg(target_arch = "x86_64")]
    {
      Self::X86_64
    }
    #[cfg(target_arch = "x86")]
    {
      Self::X86
    }
    #[cfg(target_arch = "aarch64")]
    {
      Self::Aarch64
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "x86", target_arch = "aarch64")))]
    {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Other => "other",
    }
  }
}

impl core::fmt::Display for Arch {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(self.name())
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// x86/x86_64 Features (bits 0-31)
// ─────────────────────────────────────────────────────────────────────────────

/// x86/x86_64 features relevant to vector loads and stores.
///
/// Every AVX-family bit here is only set when the OS also saves the matching
/// register state (XCR0), so a set bit means "safe to execute".
pub mod x86 {
  use super::Caps;

  /// 128-bit XMM loads/stores. Baseline on x86_64.
  pub const SSE2: Caps = Caps::bit(0);
  /// 256-bit YMM register file (VEX encoding).
  pub const AVX: Caps = Caps::bit(1);
  /// 256-bit integer operations.
  pub const AVX2: Caps = Caps::bit(2);
  /// 512-bit ZMM register file and foundation instructions.
  pub const AVX512F: Caps = Caps::bit(3);

  // ─── Combined Capability Masks ───

  /// Everything a 32-byte kernel needs: AVX state plus AVX2.
  pub const AVX2_READY: Caps = AVX.union(AVX2);
  /// Everything a 64-byte kernel needs.
  pub const AVX512_READY: Caps = AVX512F;
}

// ─────────────────────────────────────────────────────────────────────────────
// aarch64 Features (bits 32-47)
// ─────────────────────────────────────────────────────────────────────────────

/// aarch64 features relevant to vector loads and stores.
pub mod aarch64 {
  use super::Caps;

  /// 128-bit Advanced SIMD. Architecturally mandatory on aarch64.
  pub const NEON: Caps = Caps::bit(32);
}

// ─────────────────────────────────────────────────────────────────────────────
// Feature Names
// ─────────────────────────────────────────────────────────────────────────────

type FeatureEntry = (u8, &'static str);

const X86_FEATURES: &[FeatureEntry] = &[(0, "sse2"), (1, "avx"), (2, "avx2"), (3, "avx512f")];

const AARCH64_FEATURES: &[FeatureEntry] = &[(32, "neon")];

impl Caps {
  /// Returns an iterator over the names of all set feature bits.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    X86_FEATURES
      .iter()
      .chain(AARCH64_FEATURES.iter())
      .filter_map(move |(bit, name)| if self.has_bit(*bit) { Some(*name) } else { None })
  }
}

impl core::fmt::Debug for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "Caps({}", Arch::current())?;

    let mut iter = self.feature_names().peekable();
    if iter.peek().is_none() {
      return write!(f, ", none)");
    }

    write!(f, ", [")?;
    let mut first = true;
    for name in iter {
      if !first {
        write!(f, ", ")?;
      }
      first = false;
      write!(f, "{name}")?;
    }
    write!(f, "])")
  }
}

impl core::fmt::Display for Caps {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    core::fmt::Debug::fmt(self, f)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  extern crate alloc;
  extern crate std;

  use alloc::{format, vec::Vec};

  use proptest::prelude::*;

  use super::*;

  #[test]
  fn test_caps_basic() {
    let empty = Caps::NONE;
    assert!(empty.is_empty());
    assert_eq!(empty.count(), 0);

    let bit0 = Caps::bit(0);
    assert!(!bit0.is_empty());
    assert_eq!(bit0.count(), 1);
    assert!(bit0.has_bit(0));
    assert!(!bit0.has_bit(1));
  }

  #[test]
  fn test_caps_union_intersection() {
    let ab = x86::SSE2 | x86::AVX;

    assert!(ab.has(x86::SSE2));
    assert!(ab.has(x86::AVX));
    assert!(!ab.has(x86::AVX2));
    assert!(!x86::SSE2.has(ab));
    assert_eq!(ab & x86::AVX, x86::AVX);
  }

  #[test]
  fn test_ready_masks() {
    assert!(x86::AVX2_READY.has(x86::AVX));
    assert!(x86::AVX2_READY.has(x86::AVX2));
    assert!(!x86::AVX2.has(x86::AVX2_READY));
    assert!(x86::AVX512_READY.has(x86::AVX512F));
  }

  #[test]
  fn test_reserved_bit_is_masked() {
    let caps = Caps::from_raw(u64::MAX);
    assert!(!caps.has_bit(63));
    assert_eq!(caps.count(), 63);
  }

  #[test]
  fn test_feature_names() {
    let caps = x86::SSE2 | x86::AVX2 | aarch64::NEON;
    let names: Vec<_> = caps.feature_names().collect();
    assert_eq!(names, ["sse2", "avx2", "neon"]);
  }

  #[test]
  fn test_debug_format() {
    let text = format!("{:?}", Caps::NONE);
    assert!(text.ends_with(", none)"));

    let text = format!("{}", x86::SSE2 | x86::AVX);
    assert!(text.ends_with(", [sse2, avx])"));
  }

  #[test]
  fn test_arch_current() {
    let arch = Arch::current();
    #[cfg(target_arch = "x86_64")]
    assert_eq!(arch, Arch::X86_64);
    #[cfg(target_arch = "aarch64")]
    assert_eq!(arch, Arch::Aarch64);
    assert!(!arch.name().is_empty());
  }

  proptest! {
    #[test]
    fn has_matches_subset(a in any::<u64>(), b in any::<u64>()) {
      let a = Caps::from_raw(a);
      let b = Caps::from_raw(b);
      prop_assert!((a | b).has(a));
      prop_assert!((a | b).has(b));
      prop_assert_eq!(a.has(b), (a & b) == b);
    }
  }
}
